//! Pagination tails.
//!
//! Without an offset the query ends with `FETCH FIRST n ROWS ONLY`. With an
//! offset the whole query is wrapped twice so each row is tagged with its
//! ROWNUM and the page `[offset + 1, offset + limit]` is selected:
//!
//! ```text
//! SELECT * FROM (SELECT a.*, ROWNUM rnum FROM (<query>) a WHERE ROWNUM <= offset+limit) WHERE rnum > offset
//! ```

/// Alias of the row-number pseudo-column exposed by the window.
pub const ROW_NUMBER_ALIAS: &str = "rnum";

/// `FETCH FIRST <limit> ROWS ONLY`.
pub fn fetch_first(limit: u64) -> String {
    format!("FETCH FIRST {limit} ROWS ONLY")
}

/// Wrap `inner` in the ROWNUM window selecting rows `offset+1 ..= offset+limit`.
pub fn rownum_window(inner: &str, offset: u64, limit: u64) -> String {
    let upper = offset.saturating_add(limit);
    format!(
        "SELECT * FROM (SELECT a.*, ROWNUM {ROW_NUMBER_ALIAS} FROM ({inner}) a WHERE ROWNUM <= {upper}) WHERE {ROW_NUMBER_ALIAS} > {offset}"
    )
}
