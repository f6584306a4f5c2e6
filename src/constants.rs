//! Common constants used throughout the weft application.

/// Branch used when no default revision is configured
pub const DEFAULT_BRANCH: &str = "main";

/// Prefix marking a rendered name for exclusion from the output tree
pub const SKIP_PREFIX: char = '-';

/// Prefix for temporary clone directories
pub const TEMP_DIR_PREFIX: &str = "weft_clone_";
