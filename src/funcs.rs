//! The default template extension functions.
//! The base set is pure string utilities; `embed` and `import` are added
//! on top, either live (token available) or as failing stubs (no token).

use crate::error::Error;
use crate::git::SharedGitClient;
use crate::remote;
use cruet::Inflector;
use minijinja::{Environment, ErrorKind};
use std::path::PathBuf;

/// Registers the base string-utility function set.
///
/// The set is fixed; each Executor gets its own copy at construction so
/// no mutable state is shared across instances.
pub fn register_default_functions(env: &mut Environment<'static>) {
    env.add_function("lower", |s: String| s.to_lowercase());
    env.add_function("upper", |s: String| s.to_uppercase());
    env.add_function("trim", |s: String| s.trim().to_string());
    env.add_function("trim_prefix", |s: String, prefix: String| {
        s.strip_prefix(&prefix).unwrap_or(&s).to_string()
    });
    env.add_function("trim_suffix", |s: String, suffix: String| {
        s.strip_suffix(&suffix).unwrap_or(&s).to_string()
    });
    env.add_function("has_prefix", |s: String, prefix: String| s.starts_with(&prefix));
    env.add_function("has_suffix", |s: String, suffix: String| s.ends_with(&suffix));
    env.add_function("contains", |s: String, needle: String| s.contains(&needle));
    env.add_function("replace", |s: String, from: String, to: String| {
        s.replace(&from, &to)
    });
    env.add_function("trim_left", |s: String, cutset: String| {
        s.trim_start_matches(|c| cutset.contains(c)).to_string()
    });
    env.add_function("trim_right", |s: String, cutset: String| {
        s.trim_end_matches(|c| cutset.contains(c)).to_string()
    });
    env.add_function("count", |s: String, needle: String| s.matches(&needle).count());
    env.add_function("fields", |s: String| {
        s.split_whitespace().map(str::to_string).collect::<Vec<_>>()
    });
    env.add_function("equal_fold", |a: String, b: String| {
        a.to_lowercase() == b.to_lowercase()
    });
    env.add_function("repeat", |s: String, count: usize| s.repeat(count));
    env.add_function("split", |s: String, sep: String| {
        s.split(&sep).map(str::to_string).collect::<Vec<_>>()
    });
    env.add_function("join", |parts: Vec<String>, sep: String| parts.join(&sep));
    env.add_function("snake_case", |s: String| s.to_snake_case());
    env.add_function("camel_case", |s: String| s.to_camel_case());
    env.add_function("kebab_case", |s: String| s.to_kebab_case());
    env.add_function("pascal_case", |s: String| s.to_pascal_case());
    env.add_function("title_case", |s: String| s.to_title_case());
}

/// Registers `embed` and `import` backed by the given git client.
///
/// `import` materializes remote trees under `output_root`.
pub fn register_remote_functions(
    env: &mut Environment<'static>,
    client: SharedGitClient,
    output_root: PathBuf,
) {
    let embed_client = client.clone();
    let embed_root = output_root.clone();
    env.add_function(
        "embed",
        move |reference: String,
              data: minijinja::Value|
              -> Result<String, minijinja::Error> {
            remote::embed(&embed_client, &embed_root, &reference, &data)
                .map_err(into_minijinja_error)
        },
    );

    env.add_function(
        "import",
        move |reference: String,
              dest: String,
              data: minijinja::Value|
              -> Result<String, minijinja::Error> {
            remote::import(&client, &output_root, &reference, &dest, &data)
                .map_err(into_minijinja_error)?;
            Ok(String::new())
        },
    );
}

/// Registers `embed` and `import` stubs that deterministically fail,
/// so templates invoking them without credentials fail fast rather than
/// silently no-op.
pub fn register_missing_token_functions(env: &mut Environment<'static>) {
    env.add_function(
        "embed",
        |_reference: String, _data: minijinja::Value| -> Result<String, minijinja::Error> {
            Err(into_minijinja_error(Error::MissingTokenError))
        },
    );
    env.add_function(
        "import",
        |_reference: String,
         _dest: String,
         _data: minijinja::Value|
         -> Result<String, minijinja::Error> {
            Err(into_minijinja_error(Error::MissingTokenError))
        },
    );
}

fn into_minijinja_error(err: Error) -> minijinja::Error {
    minijinja::Error::new(ErrorKind::InvalidOperation, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str) -> String {
        let mut env = Environment::new();
        register_default_functions(&mut env);
        env.render_str(template, minijinja::context! {}).unwrap()
    }

    #[test]
    fn test_case_functions() {
        assert_eq!(render("{{ snake_case('SomeString') }}"), "some_string");
        assert_eq!(render("{{ camel_case('some_string') }}"), "someString");
        assert_eq!(render("{{ kebab_case('Some String') }}"), "some-string");
        assert_eq!(render("{{ pascal_case('some_string') }}"), "SomeString");
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(render("{{ upper('abc') }}"), "ABC");
        assert_eq!(render("{{ trim('  abc  ') }}"), "abc");
        assert_eq!(render("{{ trim_prefix('v1.2.3', 'v') }}"), "1.2.3");
        assert_eq!(render("{{ replace('a-b', '-', '_') }}"), "a_b");
        assert_eq!(render("{{ has_prefix('main.rs', 'main') }}"), "true");
        assert_eq!(render("{{ join(split('a,b,c', ','), '/') }}"), "a/b/c");
    }

    #[test]
    fn test_cutset_and_fold_functions() {
        assert_eq!(render("{{ trim_left('xxabc', 'x') }}"), "abc");
        assert_eq!(render("{{ trim_right('abc--', '-') }}"), "abc");
        assert_eq!(render("{{ count('cheese', 'e') }}"), "3");
        assert_eq!(render("{{ join(fields('  a  b c '), ',') }}"), "a,b,c");
        assert_eq!(render("{{ equal_fold('Go', 'GO') }}"), "true");
    }
}
