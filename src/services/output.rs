use crate::domain::models::JsonOut;
use serde::Serialize;

fn envelope<T: Serialize>(data: T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonOut { ok: true, data })?)
}

/// One `{"ok": true, "data": ...}` document, or `row(&data)` as plain text.
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!("{}", envelope(&data)?);
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Like [`print_one`], but text mode prints one line per item of `lines(&data)`.
pub fn print_lines<T: Serialize>(
    json: bool,
    data: T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!("{}", envelope(&data)?);
    } else {
        for line in lines(&data) {
            println!("{}", line);
        }
    }
    Ok(())
}
