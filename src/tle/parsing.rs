use crate::tle::TleError;

pub const TLE_LINE_LENGTH: usize = 69;

/// Splits raw element set text into an optional name line and the two data lines.
pub fn parse_tle_lines(tle: &str) -> Result<(Option<String>, String, String), TleError> {
    let lines: Vec<String> = tle
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    let (name, line1, line2) = match lines.len() {
        2 => (None, lines[0].clone(), lines[1].clone()),
        3 => (Some(lines[0].clone()), lines[1].clone(), lines[2].clone()),
        n => return Err(TleError::LineCount(n)),
    };

    validate_line(&line1, 1)?;
    validate_line(&line2, 2)?;

    if line1[2..7] != line2[2..7] {
        return Err(TleError::Line {
            line: 2,
            reason: format!(
                "catalog number {} does not match line 1 ({})",
                line2[2..7].trim(),
                line1[2..7].trim()
            ),
        });
    }

    Ok((name, line1, line2))
}

pub fn validate_line(line: &str, number: u8) -> Result<(), TleError> {
    let err = |reason: String| TleError::Line {
        line: number,
        reason,
    };

    if !line.is_ascii() {
        return Err(err("contains non-ascii characters".into()));
    }
    if line.len() != TLE_LINE_LENGTH {
        return Err(err(format!(
            "expected {} characters, got {}",
            TLE_LINE_LENGTH,
            line.len()
        )));
    }

    let bytes = line.as_bytes();
    if bytes[0] != b'0' + number || bytes[1] != b' ' {
        return Err(err(format!("must start with \"{} \"", number)));
    }

    let expected = bytes[TLE_LINE_LENGTH - 1];
    if !expected.is_ascii_digit() {
        return Err(err("checksum column is not a digit".into()));
    }
    let actual = checksum(&line[..TLE_LINE_LENGTH - 1]);
    if expected - b'0' != actual {
        return Err(err(format!(
            "checksum mismatch: expected {}, computed {}",
            expected - b'0',
            actual
        )));
    }

    Ok(())
}

/// Modulo-10 checksum: digits count their value, minus signs count one.
pub fn checksum(body: &str) -> u8 {
    let sum: u32 = body
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const LINE2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn splits_two_line_input() {
        let text = format!("{}\n{}\n", LINE1, LINE2);
        let (name, l1, l2) = parse_tle_lines(&text).unwrap();
        assert!(name.is_none());
        assert_eq!(l1, LINE1);
        assert_eq!(l2, LINE2);
    }

    #[test]
    fn splits_three_line_input_and_skips_blank_lines() {
        let text = format!("\n  ISS (ZARYA)  \n\n{}\r\n   {}   \n\n", LINE1, LINE2);
        let (name, l1, l2) = parse_tle_lines(&text).unwrap();
        assert_eq!(name.as_deref(), Some("ISS (ZARYA)"));
        assert_eq!(l1, LINE1);
        assert_eq!(l2, LINE2);
    }

    #[test]
    fn rejects_wrong_line_counts() {
        assert!(matches!(parse_tle_lines(LINE1), Err(TleError::LineCount(1))));
        assert!(matches!(parse_tle_lines(""), Err(TleError::LineCount(0))));
        let four = format!("A\nB\n{}\n{}", LINE1, LINE2);
        assert!(matches!(parse_tle_lines(&four), Err(TleError::LineCount(4))));
    }

    #[test]
    fn rejects_bad_checksum() {
        let broken = format!("{}8", &LINE1[..68]);
        let err = parse_tle_lines(&format!("{}\n{}", broken, LINE2)).unwrap_err();
        assert!(matches!(err, TleError::Line { line: 1, .. }), "{err}");
    }

    #[test]
    fn rejects_truncated_line() {
        let err = parse_tle_lines(&format!("{}\n{}", LINE1, &LINE2[..60])).unwrap_err();
        assert!(matches!(err, TleError::Line { line: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_swapped_lines() {
        let err = parse_tle_lines(&format!("{}\n{}", LINE2, LINE1)).unwrap_err();
        assert!(matches!(err, TleError::Line { line: 1, .. }), "{err}");
    }

    #[test]
    fn rejects_mismatched_catalog_numbers() {
        let other = "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667";
        let err = parse_tle_lines(&format!("{}\n{}", LINE1, other)).unwrap_err();
        assert!(matches!(err, TleError::Line { line: 2, .. }), "{err}");
    }

    #[test]
    fn checksum_counts_minus_signs() {
        assert_eq!(checksum("1-1"), 3);
        assert_eq!(checksum(&LINE1[..68]), 7);
        assert_eq!(checksum(&LINE2[..68]), 7);
    }
}
