use crate::types::{Contact, ContactError, Result};
use std::io::Read;
use std::path::Path;

const NAME_HEADERS: &[&str] = &["name", "nom", "fn"];
const NUMBER_HEADERS: &[&str] = &["number", "phone", "tel", "telephone", "numero"];
const ENABLED_HEADERS: &[&str] = &["enabled", "active", "include"];

/// Column positions resolved from the header row
struct Columns {
    name: usize,
    number: usize,
    enabled: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |candidates: &[&str]| {
            headers
                .iter()
                .position(|h| candidates.contains(&h.trim().to_lowercase().as_str()))
        };

        match (find(NAME_HEADERS), find(NUMBER_HEADERS)) {
            (Some(name), Some(number)) => Ok(Self {
                name,
                number,
                enabled: find(ENABLED_HEADERS),
            }),
            // Unknown headers: fall back to positional name, number[, enabled]
            (None, None) if headers.len() >= 2 => Ok(Self {
                name: 0,
                number: 1,
                enabled: (headers.len() >= 3).then_some(2),
            }),
            (None, _) => Err(ContactError::MissingColumns("name".to_string())),
            (_, None) => Err(ContactError::MissingColumns("number".to_string())),
        }
    }
}

fn parse_enabled(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "n" | "off"
    )
}

/// Parse contacts from CSV data with a header row.
///
/// Rows without a number are skipped. A row without a name is kept under
/// its number.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Contact>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;
    let mut contacts = Vec::new();

    for result in reader.records() {
        let record = result?;
        let number = record.get(columns.number).unwrap_or_default();
        if number.is_empty() {
            continue;
        }
        let name = match record.get(columns.name).unwrap_or_default() {
            "" => number,
            name => name,
        };
        let enabled = columns
            .enabled
            .and_then(|idx| record.get(idx))
            .map(parse_enabled)
            .unwrap_or(true);

        contacts.push(Contact {
            name: name.to_string(),
            number: number.to_string(),
            enabled,
        });
    }

    Ok(contacts)
}

pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<Contact>> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read_to_string(&path).await?;

    let contacts =
        tokio::task::spawn_blocking(move || parse_csv(contents.as_bytes())).await??;

    log::debug!("loaded {} contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}

/// Serialize contacts as `name,number,enabled` CSV.
pub fn write_csv<W: std::io::Write>(writer: W, contacts: &[Contact]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["name", "number", "enabled"])?;
    for contact in contacts {
        writer.write_record([
            contact.name.as_str(),
            contact.number.as_str(),
            if contact.enabled { "1" } else { "0" },
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn save_to_csv(path: impl AsRef<Path>, contacts: &[Contact]) -> Result<()> {
    let path = path.as_ref().to_owned();
    let contacts = contacts.to_vec();

    let bytes = tokio::task::spawn_blocking(move || {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &contacts)?;
        Ok::<_, ContactError>(buffer)
    })
    .await??;

    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_columns_in_any_order() {
        let data = "phone,Name\n0101010101,Alice\n0202020202,Bob\n";
        let contacts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(
            contacts,
            vec![
                Contact::new("Alice", "0101010101"),
                Contact::new("Bob", "0202020202"),
            ]
        );
    }

    #[test]
    fn test_parse_enabled_column() {
        let data = "name,number,enabled\nAlice,01,1\nBob,02,0\nCarol,03,no\nDan,04,\nEve,05,x\n";
        let contacts = parse_csv(data.as_bytes()).unwrap();
        let flags: Vec<bool> = contacts.iter().map(|c| c.enabled).collect();
        assert_eq!(flags, vec![true, false, false, true, true]);
    }

    #[test]
    fn test_positional_fallback() {
        let data = "a,b\nAlice,01\n";
        let contacts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(contacts, vec![Contact::new("Alice", "01")]);
    }

    #[test]
    fn test_missing_number_column() {
        let data = "name,email\nAlice,a@example.com\n";
        match parse_csv(data.as_bytes()) {
            Err(ContactError::MissingColumns(col)) => assert_eq!(col, "number"),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_rows_without_number_are_skipped() {
        let data = "name,number\nAlice,\n,0303\nBob,02\n";
        let contacts = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(
            contacts,
            vec![Contact::new("0303", "0303"), Contact::new("Bob", "02")]
        );
    }

    #[test]
    fn test_write_then_parse_keeps_disabled_flag() {
        let contacts = vec![
            Contact::new("Émile, Jr.", "0606"),
            Contact::new("Zoé", "0707").disabled(),
        ];
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &contacts).unwrap();
        assert_eq!(parse_csv(buffer.as_slice()).unwrap(), contacts);
    }
}
