use crate::series::Point;

/// Formats a point as one `index,value` line.
///
/// Debug formatting of `f64` always carries a decimal point and is the
/// shortest representation that parses back to the same bits.
pub fn encode_point(point: &Point) -> String {
    format!("{:?},{:?}\n", point.index, point.value)
}

/// Parses one line; `None` means the line is skipped.
pub fn decode_line(line: &str) -> Option<Point> {
    let mut fields = line.trim().split(',');
    let (index, value) = match (fields.next(), fields.next(), fields.next()) {
        (Some(index), Some(value), None) => (index, value),
        _ => return None,
    };
    let index = index.trim().parse::<f64>().ok()?;
    let value = value.trim().parse::<f64>().ok()?;
    Some(Point::new(index, value))
}

/// Byte-level variant of [`decode_line`]; invalid UTF-8 is skipped too.
pub fn decode_bytes(line: &[u8]) -> Option<Point> {
    std::str::from_utf8(line).ok().and_then(decode_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_indices_are_written_as_decimals() {
        assert_eq!(encode_point(&Point::new(0.0, 2.0)), "0.0,2.0\n");
        assert_eq!(encode_point(&Point::new(1.1, -0.25)), "1.1,-0.25\n");
    }

    #[test]
    fn decodes_padded_fields() {
        assert_eq!(decode_line(" 3.0 , 4.5 \r"), Some(Point::new(3.0, 4.5)));
        assert_eq!(decode_line("2,7"), Some(Point::new(2.0, 7.0)));
    }

    #[test]
    fn rejects_wrong_field_counts_and_non_numbers() {
        assert_eq!(decode_line("garbage"), None);
        assert_eq!(decode_line(""), None);
        assert_eq!(decode_line("1.0,2.0,3.0"), None);
        assert_eq!(decode_line("one,2.0"), None);
    }

    #[test]
    fn invalid_utf8_bytes_decode_to_none() {
        assert_eq!(decode_bytes(b"\xff\xfe"), None);
        assert_eq!(decode_bytes(b"1.0,\xe9"), None);
        assert_eq!(decode_bytes(b"1.0,2.5\r"), Some(Point::new(1.0, 2.5)));
    }
}
