//! Compile-time package metadata and the banner built from it.

/// Package name as shown to users.
pub const PACKAGE_NAME: &str = "UniConfig";

/// Release tag.
pub const VERSION: &str = "v1.0";

/// License identifier.
pub const LICENSE: &str = "Unlicense";

/// Author handle.
pub const AUTHOR: &str = "mkow04";

/// Author contact address.
pub const EMAIL: &str = "maciejkowalski04@proton.me";

/// Width of the separator lines framing the banner.
pub const BANNER_WIDTH: usize = 48;

/// Uppercases the first character and lowercases the rest.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// Renders the interactive banner, including the surrounding blank lines.
pub fn banner() -> String {
    let separator = "-".repeat(BANNER_WIDTH);
    format!(
        "\n{separator}\n{} '{VERSION}'\nAuthor: '{AUTHOR} <{EMAIL}>'\n{separator}\n\n",
        capitalize(PACKAGE_NAME)
    )
}
