//! String-to-binary attribute value conversion, shared by the insert,
//! select-filter, and delete-filter paths. Grounded on the `atoi`/`atof`
//! plus `memcpy`-into-buffer pattern in
//! `original_source/CS564_stage6/select.C` and `insert.C`: values arrive as
//! strings from callers and are converted to their on-page binary
//! representation per the attribute's declared type, by copying into a
//! properly aligned local rather than reinterpreting a raw byte pointer
//! (`spec.md` §9's "type punning via memory copy" note).

use std::cmp::Ordering;

use crate::catalog::types::AttrType;
use crate::common::{DbError, Result};

/// Converts `value` to its fixed-width on-page binary encoding for
/// `attr_type`/`attr_len`.
///
/// - `Integer`: parsed via Rust's `i32::from_str` (the `atoi` equivalent)
///   and written little-endian.
/// - `Float`: parsed via `f32::from_str` (the `atof` equivalent) and
///   written little-endian.
/// - `String`: copied verbatim and NUL-padded (not space-padded) to
///   `attr_len`, truncated if longer.
pub fn to_binary(value: &str, attr_type: AttrType, attr_len: usize) -> Result<Vec<u8>> {
    match attr_type {
        AttrType::Integer => {
            let n: i32 = value
                .trim()
                .parse()
                .map_err(|_| DbError::BadScanParm("value is not a valid integer"))?;
            Ok(n.to_le_bytes().to_vec())
        }
        AttrType::Float => {
            let f: f32 = value
                .trim()
                .parse()
                .map_err(|_| DbError::BadScanParm("value is not a valid float"))?;
            Ok(f.to_le_bytes().to_vec())
        }
        AttrType::String => {
            let mut buf = vec![0u8; attr_len];
            let bytes = value.as_bytes();
            let n = bytes.len().min(attr_len);
            buf[..n].copy_from_slice(&bytes[..n]);
            Ok(buf)
        }
    }
}

/// Compares `rec_bytes` (exactly `length` bytes, as extracted from a
/// record) against `filter_bytes` (the pre-converted binary filter value)
/// per `attr_type`.
///
/// Mirrors `matchRec`'s `diff` computation in `spec.md` §4.4.2 (integers and
/// floats compared numerically, copied into an aligned local rather than
/// reinterpreting the slice; strings compared byte-by-byte) but returns an
/// `Ordering` rather than a subtract-then-signum difference: the source's
/// `*(int*)(rec.data+offset) − *(int*)filter` silently wraps on signed
/// overflow in C++, but the same subtraction on `i32`/`f32` would panic in a
/// Rust debug build for inputs like `rec = i32::MIN`, `filter = i32::MAX`.
pub fn compare(rec_bytes: &[u8], filter_bytes: &[u8], attr_type: AttrType) -> Ordering {
    match attr_type {
        AttrType::Integer => {
            let a = i32::from_le_bytes(rec_bytes[..4].try_into().unwrap());
            let b = i32::from_le_bytes(filter_bytes[..4].try_into().unwrap());
            a.cmp(&b)
        }
        AttrType::Float => {
            let a = f32::from_le_bytes(rec_bytes[..4].try_into().unwrap());
            let b = f32::from_le_bytes(filter_bytes[..4].try_into().unwrap());
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        AttrType::String => rec_bytes.cmp(filter_bytes),
    }
}
