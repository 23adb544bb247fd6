//! Platform-specific constants and utility functions.

/// Name of the wrapped configuration reader, without extension
const TARGET_BINARY_STEM: &str = "my_print_defaults";

/// Get the executable file extension for the current platform
pub fn executable_extension() -> &'static str {
    #[cfg(windows)]
    return ".exe";
    #[cfg(not(windows))]
    return "";
}

/// Add the platform-specific executable extension to a file name
pub fn with_executable_extension(name: &str) -> String {
    format!("{name}{}", executable_extension())
}

/// Get the wrapped binary name for the current platform
pub fn target_binary_name() -> String {
    with_executable_extension(TARGET_BINARY_STEM)
}
