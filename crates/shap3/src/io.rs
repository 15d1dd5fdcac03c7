use std::io::Read;

use anyhow::Context;
use h3o::CellIndex;
use hexishape::parse_cell;

/// read the contents of a file, `-` reads from stdin
pub fn read_input(input: &str) -> anyhow::Result<String> {
    let mut contents = String::new();
    if input == "-" {
        std::io::stdin().read_to_string(&mut contents)?;
    } else {
        contents = std::fs::read_to_string(input).with_context(|| format!("reading {input}"))?;
    }
    Ok(contents)
}

/// parse cells from either a json array of strings or whitespace separated
/// cell strings
pub fn parse_cells(contents: &str) -> anyhow::Result<Vec<CellIndex>> {
    let trimmed = contents.trim_start();
    let cells = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed)?
            .iter()
            .map(|s| parse_cell(s))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        trimmed
            .split_whitespace()
            .map(parse_cell)
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{parse_cells, read_input};

    #[test]
    fn cells_from_json_array() {
        let cells = parse_cells(r#" ["8928308280fffff", "8928308280bffff"]"#).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].to_string(), "8928308280fffff");
        assert_eq!(cells[1].to_string(), "8928308280bffff");
    }

    #[test]
    fn cells_from_lines() {
        let cells = parse_cells("8928308280fffff\n8928308280bffff 8928308280fffff\n").unwrap();
        assert_eq!(cells.len(), 3);
    }

    #[test]
    fn invalid_cell() {
        assert!(parse_cells("8928308280fffff\nxyz").is_err());
        assert!(parse_cells("[1, 2]").is_err());
    }

    #[test]
    fn input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"8928308280fffff\n").unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(read_input(path).unwrap(), "8928308280fffff\n");
    }

    #[test]
    fn input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_input(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("reading "));
    }

    #[test]
    fn empty_input() {
        assert!(parse_cells("").unwrap().is_empty());
    }
}
