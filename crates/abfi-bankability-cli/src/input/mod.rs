pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

use abfi_bankability_core::error::parse_json;

/// Raw input text from `--input <file>` if given, otherwise from piped stdin.
pub fn read_text(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_text(path);
    }
    stdin::read_stdin()?.ok_or_else(|| "--input <file.json> or stdin required".into())
}

/// Read and deserialise a typed input; missing or malformed fields are
/// reported by path.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<T, Box<dyn std::error::Error>> {
    Ok(parse_json(&read_text(path)?)?)
}
