/// Internal macro for common logging logic
#[macro_export]
#[doc(hidden)]
macro_rules! __internal_log_impl {
    ($content:expr, $filename:expr, $append:expr) => {{
        // Silently disabled unless a log directory is configured.
        if let Ok(logs_dir) = std::env::var("ENUMGEN_LOG_DIR") {
            $crate::log::write_log(
                std::path::Path::new(&logs_dir),
                &$filename,
                &format!("{}\n", $content),
                $append,
            );
        }
    }};
}

/// Dev-mode logging macro for the enumgen crates.
///
/// Writes debug artifacts to `$ENUMGEN_LOG_DIR`. Does nothing unless the
/// `dev-mode` feature is enabled and the variable is set.
///
/// Log to a timestamp-based file (e.g., "2024_01_12_14_30_52.log"):
/// ```no_run
/// # use enumgen_core::enumgen_log;
/// enumgen_log!("Generation started");
/// ```
///
/// Log to a specific file, overwriting or appending:
/// ```no_run
/// # use enumgen_core::enumgen_log;
/// enumgen_log!("raw output", "raw_enums.rs");
/// enumgen_log!("another run", "runs.log", true);
/// ```
#[macro_export]
macro_rules! enumgen_log {
    ($content:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!(
            $content,
            format!("{}.log", $crate::chrono::Local::now().format("%Y_%m_%d_%H_%M_%S")),
            false
        );
    }};
    ($content:expr, $filename:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!($content, $filename, false);
    }};
    ($content:expr, $filename:expr, $append:expr) => {{
        #[cfg(feature = "dev-mode")]
        $crate::__internal_log_impl!($content, $filename, $append);
    }};
}

#[doc(hidden)]
pub fn write_log(logs_dir: &std::path::Path, filename: &str, content: &str, append: bool) {
    use std::io::Write;

    let _ = std::fs::create_dir_all(logs_dir);

    let mut options = std::fs::OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    if let Ok(mut file_handle) = options.open(logs_dir.join(filename)) {
        let _ = file_handle.write_all(content.as_bytes());
    }
}
