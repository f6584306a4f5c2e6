use std::io;

use weft::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::CheckoutError { revision: "v1.2.3".to_string() };
    assert_eq!(
        err.to_string(),
        "Failed to check out revision 'v1.2.3': no matching branch, tag or commit"
    );

    let err = Error::ParseError {
        reference: "github.com/owner".to_string(),
        reason: "invalid path format".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Invalid reference 'github.com/owner': invalid path format"
    );

    let err = Error::MissingTokenError;
    assert_eq!(err.to_string(), "embed and import functions require a git token");
}

#[test]
fn test_process_error_names_path_and_stage() {
    let inner = Error::IoError(io::Error::new(io::ErrorKind::NotFound, "gone"));
    let err = Error::ProcessError {
        stage: "reading",
        path: "templates/a.txt".to_string(),
        source: Box::new(inner),
    };

    let message = err.to_string();
    assert!(message.contains("reading"));
    assert!(message.contains("templates/a.txt"));
}
