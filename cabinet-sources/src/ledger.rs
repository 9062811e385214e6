//! Parsing for Steam's brace-delimited key/value ledger files
//! (`libraryfolders.vdf`, `appmanifest_*.acf`).
//!
//! The format nests `"key" { ... }` blocks, but everything the scanner
//! needs is a flat set of `"key" "value"` pairs, so the parser walks the
//! file line by line and extracts quoted-token pairs regardless of
//! nesting depth. Quoted tokens honor backslash escapes (`\\`, `\"`).

/// A parsed `appmanifest_*.acf` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppManifest {
    pub app_id: String,
    pub name: String,
    /// Install directory name relative to the library's `common` folder.
    /// Empty when the manifest doesn't record one.
    pub install_dir: String,
}

/// Extract every `"path"` value from a `libraryfolders.vdf` document.
pub fn parse_library_paths(content: &str) -> Vec<String> {
    kv_pairs(content)
        .filter(|(key, _)| key == "path")
        .map(|(_, value)| value)
        .collect()
}

/// Parse an app manifest. Returns `None` when `appid` or `name` is
/// missing — such manifests are dropped, not errors.
pub fn parse_app_manifest(content: &str) -> Option<AppManifest> {
    let mut app_id = None;
    let mut name = None;
    let mut install_dir = None;

    for (key, value) in kv_pairs(content) {
        match key.as_str() {
            // First occurrence wins; the fields live at the top level
            // and nested blocks must not override them.
            "appid" if app_id.is_none() => app_id = Some(value),
            "name" if name.is_none() => name = Some(value),
            "installdir" if install_dir.is_none() => install_dir = Some(value),
            _ => {}
        }
    }

    Some(AppManifest {
        app_id: app_id?,
        name: name?,
        install_dir: install_dir.unwrap_or_default(),
    })
}

/// Iterate `"key" "value"` pairs: lines whose quoted-token count is
/// exactly two. Block-structure lines (`"key"`, `{`, `}`) fall out
/// naturally.
fn kv_pairs(content: &str) -> impl Iterator<Item = (String, String)> + '_ {
    content.lines().filter_map(|line| {
        let mut tokens = quoted_tokens(line);
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(value), None) => Some((key, value)),
            _ => None,
        }
    })
}

/// Yield the quoted strings on one line, unescaping `\\` and `\"`.
fn quoted_tokens(line: &str) -> impl Iterator<Item = String> + '_ {
    let mut chars = line.chars();
    std::iter::from_fn(move || {
        // Seek the opening quote
        loop {
            match chars.next() {
                Some('"') => break,
                Some(_) => continue,
                None => return None,
            }
        }
        let mut token = String::new();
        loop {
            match chars.next() {
                Some('\\') => match chars.next() {
                    Some(escaped) => token.push(escaped),
                    None => break,
                },
                Some('"') | None => break,
                Some(c) => token.push(c),
            }
        }
        Some(token)
    })
}
