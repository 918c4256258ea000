//! Line codec for the student data file
//!
//! One record per line: `id|name|mark1,mark2,mark3|average|grade|active`.
//! The writer always emits all six fields. The reader is lenient: lines missing
//! a field are skipped whole, missing marks become 0, extra marks and extra
//! fields are ignored, and unparseable numbers read as 0.

use crate::core::models::student::{
    truncate_to, Marks, RawText, Student, MARK_COUNT, MAX_ID_LENGTH, MAX_NAME_LENGTH,
};
use crate::debug;

/// Separator between record fields
pub const FIELD_SEPARATOR: u8 = b'|';

/// Separator between marks inside the marks field
pub const MARK_SEPARATOR: u8 = b',';

/// Encode records, one line each, deleted records included
#[must_use]
pub fn encode(students: &[Student]) -> Vec<u8> {
    let mut out = Vec::new();
    for student in students {
        out.extend_from_slice(&encode_line(student));
        out.push(b'\n');
    }
    out
}

/// Encode a single record without a trailing newline
///
/// ID and name bytes that were kept from the data file are written back as
/// they were read.
#[must_use]
pub fn encode_line(student: &Student) -> Vec<u8> {
    let [m1, m2, m3] = student.marks;
    let numbers = format!(
        "{m1},{m2},{m3}|{average:.2}|{grade}|{active}",
        average = student.average,
        grade = student.grade,
        active = u8::from(student.active),
    );

    let mut line = Vec::with_capacity(numbers.len() + 32);
    line.extend_from_slice(student.id_bytes());
    line.push(FIELD_SEPARATOR);
    line.extend_from_slice(student.name_bytes());
    line.push(FIELD_SEPARATOR);
    line.extend_from_slice(numbers.as_bytes());
    line
}

/// Decode up to `capacity` records from data file contents
///
/// Malformed lines are dropped silently (logged at debug level). Decoding
/// stops once `capacity` records have been read, even if lines remain.
#[must_use]
pub fn decode(raw: impl AsRef<[u8]>, capacity: usize) -> Vec<Student> {
    let raw = raw.as_ref();
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let mut students = Vec::new();
    for (number, line) in raw.split(|b| *b == b'\n').enumerate() {
        if students.len() >= capacity {
            debug!(
                "Capacity {capacity} reached; ignoring lines from {}",
                number + 1
            );
            break;
        }
        match decode_line(line) {
            Some(student) => students.push(student),
            None => debug!(
                "Skipping malformed line {}: {:?}",
                number + 1,
                String::from_utf8_lossy(line)
            ),
        }
    }
    students
}

/// Decode one line, or `None` when any of the six fields is missing
///
/// The ID and grade fields must also be non-empty. Average and grade are taken
/// from the line as written, not recomputed from the marks. A trailing `\r` is
/// ignored.
#[must_use]
pub fn decode_line(line: impl AsRef<[u8]>) -> Option<Student> {
    let line = line.as_ref();
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let mut fields = line.split(|b| *b == FIELD_SEPARATOR);

    let id = fields.next().filter(|f| !f.is_empty())?;
    let name = fields.next()?;
    let marks = fields.next().map(decode_marks)?;
    let average = lenient_float(&String::from_utf8_lossy(fields.next()?));
    let grade = String::from_utf8_lossy(fields.next()?).chars().next()?;
    let active = lenient_int(&String::from_utf8_lossy(fields.next()?));

    let (id, raw_id) = decode_text(id, MAX_ID_LENGTH);
    let (name, raw_name) = decode_text(name, MAX_NAME_LENGTH);

    Some(Student {
        id,
        name,
        marks,
        average,
        grade,
        active: active != 0,
        raw: RawText {
            id: raw_id,
            name: raw_name,
        },
    })
}

/// Text of a field cut to `max_bytes`, plus its bytes when they are not UTF-8
fn decode_text(field: &[u8], max_bytes: usize) -> (String, Option<Vec<u8>>) {
    match std::str::from_utf8(field) {
        Ok(text) => (truncate_to(text, max_bytes).to_string(), None),
        Err(_) => {
            let kept = &field[..field.len().min(max_bytes)];
            (
                String::from_utf8_lossy(kept).into_owned(),
                Some(kept.to_vec()),
            )
        }
    }
}

/// Read up to [`MARK_COUNT`] marks, skipping empty tokens and zero-filling the rest
fn decode_marks(field: &[u8]) -> Marks {
    let mut marks = [0; MARK_COUNT];
    let tokens = field
        .split(|b| *b == MARK_SEPARATOR)
        .filter(|t| !t.is_empty());
    for (slot, token) in marks.iter_mut().zip(tokens) {
        *slot = lenient_int(&String::from_utf8_lossy(token));
    }
    marks
}

/// Split a leading sign off `s`
fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// Parse the leading integer of `token`, or 0 when there is none
///
/// Leading whitespace and a sign are accepted and anything after the digits is
/// ignored, so `"85abc"` reads as 85 and `"abc"` as 0. Values saturate at the
/// `i32` bounds.
#[must_use]
pub fn lenient_int(token: &str) -> i32 {
    let (negative, digits) = split_sign(token.trim_start());
    let limit = i64::from(i32::MAX) + 1;
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, d| (acc * 10 + i64::from(d - b'0')).min(limit));
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or(0)
}

/// Parse the leading decimal number of `token`, or 0 when there is none
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. Trailing garbage is ignored.
#[must_use]
pub fn lenient_float(token: &str) -> f32 {
    let trimmed = token.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    trimmed[..end].parse::<f32>().unwrap_or(0.0)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_format() {
        let mut student = Student::new("S1", "Ada Lovelace", [90, 80, 70]);
        assert_eq!(encode_line(&student), b"S1|Ada Lovelace|90,80,70|80.00|B|1");

        student.active = false;
        student.average = 66.666_664;
        assert_eq!(encode_line(&student), b"S1|Ada Lovelace|90,80,70|66.67|B|0");
    }

    #[test]
    fn test_undecodable_name_round_trips() {
        let line = b"S1|Jos\xe9|90,80,70|80.00|B|1";
        let student = decode_line(line).unwrap();

        assert_eq!(student.name, "Jos\u{fffd}");
        assert_eq!(student.raw.name.as_deref(), Some(&b"Jos\xe9"[..]));
        assert!(student.raw.id.is_none());
        assert_eq!(encode_line(&student), line);
    }

    #[test]
    fn test_undecodable_field_truncated_by_bytes() {
        let mut line = b"S1|".to_vec();
        line.extend(std::iter::repeat(0xe9).take(60));
        line.extend_from_slice(b"|1,2,3|2.00|F|1");

        let student = decode_line(&line).unwrap();
        assert_eq!(
            student.raw.name.as_ref().map(Vec::len),
            Some(MAX_NAME_LENGTH)
        );
    }

    #[test]
    fn test_decode_full_line() {
        let student = decode_line("S7|Grace Hopper|85,90,95|90.00|A|1").unwrap();

        assert_eq!(student.id, "S7");
        assert_eq!(student.name, "Grace Hopper");
        assert_eq!(student.marks, [85, 90, 95]);
        assert!((student.average - 90.0).abs() < f32::EPSILON);
        assert_eq!(student.grade, 'A');
        assert!(student.active);
    }

    #[test]
    fn test_decode_keeps_stored_average_and_grade() {
        // Stored values disagree with the marks on purpose
        let student = decode_line("S1|X|10,10,10|99.50|A|1").unwrap();
        assert!((student.average - 99.5).abs() < f32::EPSILON);
        assert_eq!(student.grade, 'A');
    }

    #[test]
    fn test_decode_skips_short_lines() {
        assert!(decode_line("S1|Name").is_none());
        assert!(decode_line("S1|Name|1,2,3|2.00|F").is_none());
        assert!(decode_line("").is_none());
    }

    #[test]
    fn test_decode_requires_id_and_grade() {
        assert!(decode_line("|Name|1,2,3|2.00|F|1").is_none());
        assert!(decode_line("S1|Name|1,2,3|2.00||1").is_none());
    }

    #[test]
    fn test_decode_allows_empty_name() {
        let student = decode_line("S1||1,2,3|2.00|F|1").unwrap();
        assert_eq!(student.name, "");
    }

    #[test]
    fn test_decode_marks_zero_fill_and_extra() {
        assert_eq!(decode_line("S1|A|70,,|0|F|1").unwrap().marks, [70, 0, 0]);
        assert_eq!(decode_line("S1|A|70|0|F|1").unwrap().marks, [70, 0, 0]);
        assert_eq!(decode_line("S1|A||0|F|1").unwrap().marks, [0, 0, 0]);
        assert_eq!(
            decode_line("S1|A|1,2,3,4,5|0|F|1").unwrap().marks,
            [1, 2, 3]
        );
    }

    #[test]
    fn test_decode_extra_fields_ignored() {
        let student = decode_line("S1|A|1,2,3|2.00|F|0|extra|more").unwrap();
        assert!(!student.active);
    }

    #[test]
    fn test_decode_non_numeric_fields_read_as_zero() {
        let student = decode_line("S1|A|x,5y,z|avg|F|yes").unwrap();
        assert_eq!(student.marks, [0, 5, 0]);
        assert!(student.average.abs() < f32::EPSILON);
        assert!(!student.active);
    }

    #[test]
    fn test_decode_active_flag_is_truthy() {
        assert!(decode_line("S1|A|1,2,3|2.00|F|2").unwrap().active);
        assert!(!decode_line("S1|A|1,2,3|2.00|F|0").unwrap().active);
    }

    #[test]
    fn test_decode_grade_takes_first_char() {
        assert_eq!(decode_line("S1|A|1,2,3|2.00|Bxyz|1").unwrap().grade, 'B');
    }

    #[test]
    fn test_decode_truncates_long_fields() {
        let line = format!("{}|{}|1,2,3|2.00|F|1", "I".repeat(30), "N".repeat(60));
        let student = decode_line(&line).unwrap();
        assert_eq!(student.id.len(), MAX_ID_LENGTH);
        assert_eq!(student.name.len(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_decode_stops_at_capacity() {
        let raw = "A|a|1,1,1|1.00|F|1\nB|b|1,1,1|1.00|F|1\nC|c|1,1,1|1.00|F|1\n";
        let students = decode(raw, 2);
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].id, "B");
    }

    #[test]
    fn test_decode_handles_crlf() {
        let students = decode("A|a|1,2,3|2.00|F|1\r\nB|b|4,5,6|5.00|F|0\r\n", 10);
        assert_eq!(students.len(), 2);
        assert!(!students[1].active);
    }

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int("42"), 42);
        assert_eq!(lenient_int("  -7"), -7);
        assert_eq!(lenient_int("+3"), 3);
        assert_eq!(lenient_int("85abc"), 85);
        assert_eq!(lenient_int("abc"), 0);
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("-"), 0);
        assert_eq!(lenient_int("99999999999"), i32::MAX);
        assert_eq!(lenient_int("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_lenient_float() {
        assert!((lenient_float("80.33") - 80.33).abs() < f32::EPSILON);
        assert!((lenient_float(" 7.5kg") - 7.5).abs() < f32::EPSILON);
        assert!((lenient_float("-.5") + 0.5).abs() < f32::EPSILON);
        assert!((lenient_float("1e2") - 100.0).abs() < f32::EPSILON);
        assert!((lenient_float("3e") - 3.0).abs() < f32::EPSILON);
        assert!((lenient_float("5.") - 5.0).abs() < f32::EPSILON);
        assert!(lenient_float("abc").abs() < f32::EPSILON);
        assert!(lenient_float(".").abs() < f32::EPSILON);
        assert!(lenient_float("").abs() < f32::EPSILON);
    }
}
