// SPDX-License-Identifier: GPL-3.0-only

//! Parsers for e2fsprogs text output

use e2fs_types::KeyValueRecord;

use crate::error::{E2fsError, Result};

/// First-line prefixes under which `tune2fs -l` prints its own version.
const BANNER_PREFIXES: [&str; 2] = ["tune2fs ", "tune4fs "];

/// Values printed in place of an absent field.
const ABSENT_SENTINELS: [&str; 3] = ["<none>", "<not available>", "(none)"];

const UUID_LABEL: &str = "\nFilesystem UUID:";

/// Split a `tune2fs -l` dump into ordered key/value pairs.
///
/// `Key: value` lines split at the first colon; the key is kept as printed
/// and the value is left-trimmed. Lines without a colon become a key with an
/// empty value. Blank lines are skipped.
pub fn parse_listing(output: &str) -> Result<KeyValueRecord> {
    let mut body = output;

    if BANNER_PREFIXES.iter().any(|prefix| body.starts_with(prefix)) {
        body = match body.split_once('\n') {
            Some((_, rest)) => rest,
            None => return Err(E2fsError::MalformedOutput("truncated output".to_string())),
        };
    }

    let mut record = KeyValueRecord::new();
    for line in body.split('\n').filter(|line| !line.is_empty()) {
        match line.split_once(':') {
            Some((key, raw)) => {
                let value = raw.trim_start();
                if ABSENT_SENTINELS.contains(&value) {
                    record.push(key, "");
                } else {
                    record.push(key, value);
                }
            }
            None => record.push(line, ""),
        }
    }

    Ok(record)
}

/// Locate the `Filesystem UUID:` field in the output of `<tool> -l`.
///
/// The label must start a line other than the first. Whitespace after it,
/// newlines included, is skipped; the value is the run of hex digits and
/// hyphens that follows.
pub fn extract_filesystem_uuid(output: &str, tool: &str) -> Result<String> {
    let Some(at) = output.find(UUID_LABEL) else {
        return Err(E2fsError::MalformedOutput(format!(
            "no Filesystem UUID in the output of {tool} -l"
        )));
    };

    let malformed = || {
        E2fsError::MalformedOutput(format!(
            "malformed Filesystem UUID in the output of {tool} -l"
        ))
    };

    let rest = output[at + UUID_LABEL.len()..].trim_start();
    if rest.is_empty() {
        return Err(malformed());
    }

    let end = rest
        .find(|c: char| !(c.is_ascii_hexdigit() || c == '-'))
        .unwrap_or(rest.len());
    if end == 0 {
        return Err(malformed());
    }

    Ok(rest[..end].to_string())
}

/// Drop a single trailing newline from `e2label` output.
pub fn strip_label_newline(output: &str) -> &str {
    output.strip_suffix('\n').unwrap_or(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = "tune2fs 1.47.0 (5-Feb-2023)\n\
Filesystem volume name:   <none>\n\
Last mounted on:          /mnt/data\n\
Filesystem UUID:          5b5e3ab4-b4e2-4e0a-9f6e-3c1c1b06f6a1\n\
Filesystem magic number:  0xEF53\n\
Filesystem features:      has_journal ext_attr resize_inode dir_index filetype\n\
Default mount options:    user_xattr acl\n\
Filesystem OS type:       Linux\n\
Journal UUID:             <none>\n\
Journal device:\t          0x0000\n\
Default directory hash:   half_md4\n\
Last checked:             Mon Oct 19 09:12:44 2026\n";

    #[test]
    fn parses_banner_prefixed_dump() {
        let record = parse_listing(DUMP).unwrap();
        assert_eq!(record.len(), 11);
        assert_eq!(record.keys().next(), Some("Filesystem volume name"));
        assert!(record.keys().all(|key| !key.starts_with("tune2fs")));
        assert_eq!(record.get("Filesystem volume name"), Some(""));
        assert_eq!(record.get("Last mounted on"), Some("/mnt/data"));
        assert_eq!(record.get("Filesystem magic number"), Some("0xEF53"));
    }

    #[test]
    fn splits_at_first_colon_only() {
        let record = parse_listing(DUMP).unwrap();
        assert_eq!(record.get("Last checked"), Some("Mon Oct 19 09:12:44 2026"));
    }

    #[test]
    fn key_is_not_trimmed() {
        let record = parse_listing("  Reserved GDT blocks : 63\n").unwrap();
        assert_eq!(record.iter().next(), Some(("  Reserved GDT blocks ", "63")));
    }

    #[test]
    fn value_is_left_trimmed_only() {
        let record = parse_listing("Journal device:\t  0x0000  \n").unwrap();
        assert_eq!(record.get("Journal device"), Some("0x0000  "));
    }

    #[test]
    fn substitutes_exact_sentinels_only() {
        let record = parse_listing(
            "Free blocks: <none>\nBackup: <not available>\nOwner: (none)\nErrors: <none found>\n",
        )
        .unwrap();
        assert_eq!(record.get("Free blocks"), Some(""));
        assert_eq!(record.get("Backup"), Some(""));
        assert_eq!(record.get("Owner"), Some(""));
        assert_eq!(record.get("Errors"), Some("<none found>"));
    }

    #[test]
    fn line_without_colon_is_a_bare_key() {
        let record = parse_listing("Journal features:         journal_64bit\n  continued text  \n")
            .unwrap();
        let pairs = record.into_pairs();
        assert_eq!(pairs[1], ("  continued text  ".to_string(), String::new()));
    }

    #[test]
    fn skips_blank_lines_anywhere() {
        let record = parse_listing("tune4fs 1.41.12 (17-May-2010)\n\n\nA: 1\n\nB: 2").unwrap();
        let pairs = record.into_pairs();
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn keeps_duplicate_keys() {
        let record = parse_listing("Reserved: 1\nReserved: 2\n").unwrap();
        let all: Vec<&str> = record.get_all("Reserved").collect();
        assert_eq!(all, vec!["1", "2"]);
    }

    #[test]
    fn banner_without_newline_is_truncated() {
        let err = parse_listing("tune2fs 1.47.0 (5-Feb-2023)").unwrap_err();
        assert!(matches!(err, E2fsError::MalformedOutput(_)));
        assert_eq!(err.to_string(), "truncated output");
    }

    #[test]
    fn banner_only_yields_empty_record() {
        let record = parse_listing("tune2fs 1.47.0 (5-Feb-2023)\n").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn first_line_is_kept_without_banner() {
        let record = parse_listing("Filesystem volume name:   root\n").unwrap();
        assert_eq!(record.get("Filesystem volume name"), Some("root"));
    }

    #[test]
    fn extracts_uuid() {
        let uuid = extract_filesystem_uuid(DUMP, "tune2fs").unwrap();
        assert_eq!(uuid, "5b5e3ab4-b4e2-4e0a-9f6e-3c1c1b06f6a1");
    }

    #[test]
    fn extracts_uuid_from_minimal_dump() {
        let uuid =
            extract_filesystem_uuid("tune2fs 1.47.0\nFilesystem UUID:   1234-ABCD\n", "tune2fs")
                .unwrap();
        assert_eq!(uuid, "1234-ABCD");
    }

    #[test]
    fn missing_uuid_label() {
        let err = extract_filesystem_uuid("tune2fs 1.47.0\nBlock count: 1\n", "tune4fs").unwrap_err();
        assert!(matches!(err, E2fsError::MalformedOutput(_)));
        assert_eq!(err.to_string(), "no Filesystem UUID in the output of tune4fs -l");
    }

    #[test]
    fn uuid_label_on_first_line_is_not_matched() {
        let err = extract_filesystem_uuid("Filesystem UUID: 1234\n", "tune2fs").unwrap_err();
        assert!(err.to_string().contains("no Filesystem UUID"));
    }

    #[test]
    fn uuid_label_at_end_of_output() {
        let err = extract_filesystem_uuid("banner\nFilesystem UUID:", "tune2fs").unwrap_err();
        assert!(err.to_string().starts_with("malformed Filesystem UUID"));

        let err = extract_filesystem_uuid("banner\nFilesystem UUID:   ", "tune2fs").unwrap_err();
        assert!(err.to_string().starts_with("malformed Filesystem UUID"));
    }

    #[test]
    fn uuid_value_with_no_hex_digits() {
        let err =
            extract_filesystem_uuid("banner\nFilesystem UUID: <none>\n", "tune2fs").unwrap_err();
        assert!(err.to_string().starts_with("malformed Filesystem UUID"));
    }

    #[test]
    fn uuid_may_follow_on_next_line() {
        let uuid = extract_filesystem_uuid("banner\nFilesystem UUID:\n  1234-abcd\n", "tune2fs")
            .unwrap();
        assert_eq!(uuid, "1234-abcd");
    }

    #[test]
    fn uuid_extent_stops_at_first_other_character() {
        let uuid = extract_filesystem_uuid("banner\nFilesystem UUID:\t0e6a-1c2f (stale)\n", "tune2fs")
            .unwrap();
        assert_eq!(uuid, "0e6a-1c2f");
    }

    #[test]
    fn strips_one_trailing_newline() {
        assert_eq!(strip_label_newline("mylabel\n"), "mylabel");
        assert_eq!(strip_label_newline("mylabel"), "mylabel");
        assert_eq!(strip_label_newline("mylabel\n\n"), "mylabel\n");
        assert_eq!(strip_label_newline(""), "");
    }
}
