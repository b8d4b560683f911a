//! Utility functions for path manipulation, command argument parsing and
//! process statistics.

use std::path::PathBuf;

/// Constructs a file system path by joining a directory path with a file name.
///
/// # Arguments
///
/// * `dir_path` - The base directory path
/// * `subdir_path` - The subdirectory or file name to append
///
/// # Returns
///
/// A `String` containing the joined path. Non UTF-8 components are replaced
/// lossily.
///
/// # Examples
///
/// ```
/// # use pubgbot::utils::get_path;
/// let path = get_path("/home/user", "registry");
/// assert_eq!(path, "/home/user/registry");
/// ```
pub fn get_path(dir_path: &str, subdir_path: &str) -> String {
    let path_buf: PathBuf = [dir_path, subdir_path].iter().collect();
    path_buf.to_string_lossy().into_owned()
}

/// Returns whether an argument uses the `key=value` form.
pub fn is_keyword_argument(argument: &str) -> bool {
    argument.contains('=')
}

/// Returns the value of the first `key=value` argument matching `key`.
///
/// Keys are matched case-insensitively. An empty value counts as missing.
///
/// # Examples
///
/// ```
/// # use pubgbot::utils::get_param_value;
/// let args = vec!["shroud".to_string(), "region=pc-eu".to_string()];
/// assert_eq!(get_param_value("region", &args), Some("pc-eu".to_string()));
/// assert_eq!(get_param_value("mode", &args), None);
/// ```
pub fn get_param_value(key: &str, arguments: &[String]) -> Option<String> {
    arguments.iter().find_map(|argument| {
        let (name, value) = argument.split_once('=')?;
        if name.eq_ignore_ascii_case(key) && !value.is_empty() {
            Some(value.to_owned())
        } else {
            None
        }
    })
}

/// Positional (non `key=value`) arguments, in order.
pub fn positional_arguments(arguments: &[String]) -> Vec<&str> {
    arguments
        .iter()
        .filter(|argument| !is_keyword_argument(argument))
        .map(String::as_str)
        .collect()
}

/// Brings a user supplied region or mode to its catalog encoding.
///
/// `pc-na` → `PC_NA`, `squad-fpp` → `SQUAD_FPP`.
pub fn normalize_catalog_token(value: &str) -> String {
    value.to_uppercase().replace('-', "_")
}

/// Resident memory of the bot process in kilobytes.
///
/// Read from `/proc/self/status`, `None` where it is not available.
pub async fn resident_memory_kb() -> Option<u64> {
    let status = tokio::fs::read_to_string("/proc/self/status").await.ok()?;
    parse_vm_rss(&status)
}

fn parse_vm_rss(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmRSS:"))
        .and_then(|value| value.trim().trim_end_matches("kB").trim().parse().ok())
}
