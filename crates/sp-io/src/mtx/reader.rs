use std::io::{BufRead, Cursor};
use std::path::Path;
use std::str::FromStr;

use memmap2::Mmap;

use sp_matrix::{CooMatrix, Element, MatrixShape, Real};

use super::header::{MatrixMarketHeader, MtxField, MtxSymmetry};
use crate::error::{MtxError, Result};

/// Upper bound on elements reserved ahead of parsing. The size line is
/// untrusted, so larger files grow the buffer as entries arrive.
const MAX_RESERVE: usize = 1 << 20;

/// The size line of a coordinate file: `nrows ncols entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MtxSize {
    pub nrows: usize,
    pub ncols: usize,
    /// Number of entry lines in the file (before symmetric expansion).
    pub entries: usize,
}

/// A Matrix Market coordinate file backed by a memory-mapped region.
///
/// The banner and size line are parsed on `open`; entries are parsed from
/// the mapping on each call to `to_coo`.
pub struct MatrixMarketFile {
    pub header: MatrixMarketHeader,
    pub size: MtxSize,
    mmap: Mmap,
    /// Byte offset of the first line after the size line.
    data_offset: usize,
    /// Number of lines before `data_offset`, for error messages.
    data_line: usize,
}

impl MatrixMarketFile {
    /// Open a `.mtx` file and parse its banner and size line.
    pub fn open(path: &Path) -> Result<MatrixMarketFile> {
        let file = std::fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let mut lines = Lines::new(Cursor::new(&mmap[..]), 0);
        let (header, size) = read_preamble(&mut lines)?;
        let data_offset = lines.inner.position() as usize;
        let data_line = lines.line;

        tracing::debug!(
            path = %path.display(),
            nrows = size.nrows,
            ncols = size.ncols,
            entries = size.entries,
            "opened matrix market file"
        );

        Ok(MatrixMarketFile {
            header,
            size,
            mmap,
            data_offset,
            data_line,
        })
    }

    pub fn shape(&self) -> MatrixShape {
        MatrixShape::new(self.size.nrows, self.size.ncols)
    }

    /// Parse the entries into a COO matrix, expanding symmetric storage.
    pub fn to_coo(&self) -> Result<CooMatrix> {
        let mut lines = Lines::new(Cursor::new(&self.mmap[self.data_offset..]), self.data_line);
        let coo = read_entries(&mut lines, &self.header, &self.size)?;
        tracing::info!(shape = %coo.shape(), nnz = coo.nnz(), "loaded matrix market file");
        Ok(coo)
    }
}

/// Read a whole Matrix Market coordinate stream into a COO matrix.
pub fn read_coo<R: BufRead>(reader: R) -> Result<CooMatrix> {
    let mut lines = Lines::new(reader, 0);
    let (header, size) = read_preamble(&mut lines)?;
    read_entries(&mut lines, &header, &size)
}

/// Line reader that counts lines and skips comments on request.
struct Lines<R> {
    inner: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> Lines<R> {
    fn new(inner: R, line: usize) -> Self {
        Lines {
            inner,
            line,
            buf: String::new(),
        }
    }

    /// Read the next line into `buf`. Returns false at end of input.
    fn advance(&mut self) -> Result<bool> {
        self.buf.clear();
        if self.inner.read_line(&mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }

    /// Read the next line that is neither blank nor a `%` comment.
    fn advance_data(&mut self) -> Result<bool> {
        while self.advance()? {
            let t = self.buf.trim();
            if !t.is_empty() && !t.starts_with('%') {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn parse_error(&self, message: impl Into<String>) -> MtxError {
        MtxError::Parse {
            line: self.line,
            message: message.into(),
        }
    }
}

fn read_preamble<R: BufRead>(lines: &mut Lines<R>) -> Result<(MatrixMarketHeader, MtxSize)> {
    if !lines.advance()? {
        return Err(MtxError::InvalidBanner(String::new()));
    }
    let header = MatrixMarketHeader::parse(&lines.buf)?;

    if !lines.advance_data()? {
        return Err(lines.parse_error("missing size line"));
    }
    let dims: Vec<usize> = lines
        .buf
        .split_whitespace()
        .map(usize::from_str)
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| lines.parse_error(format!("invalid size line: {}", e)))?;
    if dims.len() != 3 {
        return Err(lines.parse_error(format!(
            "size line has {} fields, expected 3",
            dims.len()
        )));
    }

    let size = MtxSize {
        nrows: dims[0],
        ncols: dims[1],
        entries: dims[2],
    };
    Ok((header, size))
}

fn read_entries<R: BufRead>(
    lines: &mut Lines<R>,
    header: &MatrixMarketHeader,
    size: &MtxSize,
) -> Result<CooMatrix> {
    let shape = MatrixShape::new(size.nrows, size.ncols);
    let stored = match header.symmetry {
        MtxSymmetry::General => Some(size.entries),
        _ => size.entries.checked_mul(2),
    };
    let mut elements = Vec::with_capacity(stored.map_or(MAX_RESERVE, |n| n.min(MAX_RESERVE)));

    for found in 0..size.entries {
        if !lines.advance_data()? {
            return Err(MtxError::EntryCount {
                expected: size.entries,
                found,
            });
        }
        let (row, col, value) = parse_entry(lines, header.field)?;
        shape.check_index(row, col)?;
        elements.push(Element::new(row, col, value));

        if row != col {
            match header.symmetry {
                MtxSymmetry::General => {}
                MtxSymmetry::Symmetric => elements.push(Element::new(col, row, value)),
                MtxSymmetry::SkewSymmetric => elements.push(Element::new(col, row, -value)),
            }
        }
    }

    let mut extra = 0;
    while lines.advance_data()? {
        extra += 1;
    }
    if extra > 0 {
        return Err(MtxError::EntryCount {
            expected: size.entries,
            found: size.entries.saturating_add(extra),
        });
    }

    Ok(CooMatrix::new(shape, elements)?)
}

/// Parse `row col [value]` from the current line into zero-based indices.
fn parse_entry<R: BufRead>(lines: &Lines<R>, field: MtxField) -> Result<(usize, usize, Real)> {
    let mut tokens = lines.buf.split_whitespace();
    let row = parse_index(lines, tokens.next(), "row")?;
    let col = parse_index(lines, tokens.next(), "column")?;
    let value = match field {
        MtxField::Pattern => 1.0,
        MtxField::Real => parse_token::<R, f64>(lines, tokens.next(), "value")?,
        MtxField::Integer => parse_token::<R, i64>(lines, tokens.next(), "value")? as Real,
    };
    Ok((row - 1, col - 1, value))
}

fn parse_index<R: BufRead>(lines: &Lines<R>, token: Option<&str>, what: &str) -> Result<usize> {
    let index = parse_token::<R, usize>(lines, token, what)?;
    if index == 0 {
        return Err(lines.parse_error(format!("{} index must be one-based, got 0", what)));
    }
    Ok(index)
}

fn parse_token<R: BufRead, T: FromStr>(
    lines: &Lines<R>,
    token: Option<&str>,
    what: &str,
) -> Result<T> {
    let token = token.ok_or_else(|| lines.parse_error(format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| lines.parse_error(format!("invalid {}: {:?}", what, token)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn elements(coo: &CooMatrix) -> Vec<(usize, usize, Real)> {
        coo.elements().iter().map(|e| (e.row, e.col, e.value)).collect()
    }

    #[test]
    fn test_read_general() {
        let text = "%%MatrixMarket matrix coordinate real general\n\
                    % a comment\n\
                    \n\
                    2 3 2\n\
                    1 3 2.5\n\
                    2 1 -1\n";
        let coo = read_coo(text.as_bytes()).unwrap();
        assert_eq!(coo.shape(), MatrixShape::new(2, 3));
        assert_eq!(elements(&coo), vec![(0, 2, 2.5), (1, 0, -1.0)]);
    }

    #[test]
    fn test_read_symmetric_pattern() {
        let text = "%%MatrixMarket matrix coordinate pattern symmetric\n\
                    3 3 2\n\
                    1 1\n\
                    3 1\n";
        let coo = read_coo(text.as_bytes()).unwrap();
        assert_eq!(elements(&coo), vec![(0, 0, 1.0), (2, 0, 1.0), (0, 2, 1.0)]);
    }

    #[test]
    fn test_read_skew_symmetric_integer() {
        let text = "%%MatrixMarket matrix coordinate integer skew-symmetric\n\
                    2 2 1\n\
                    2 1 4\n";
        let coo = read_coo(text.as_bytes()).unwrap();
        assert_eq!(elements(&coo), vec![(1, 0, 4.0), (0, 1, -4.0)]);
    }

    #[test]
    fn test_too_few_entries() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 3\n1 1 1.0\n";
        assert!(matches!(
            read_coo(text.as_bytes()),
            Err(MtxError::EntryCount { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_too_many_entries() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 1.0\n2 2 1.0\n";
        assert!(matches!(
            read_coo(text.as_bytes()),
            Err(MtxError::EntryCount { expected: 1, found: 2 })
        ));
    }

    #[test]
    fn test_huge_declared_count_is_entry_count_error() {
        let text = "%%MatrixMarket matrix coordinate real general\n\
                    2 2 100000000000000\n\
                    1 1 1.0\n";
        assert!(matches!(
            read_coo(text.as_bytes()),
            Err(MtxError::EntryCount { expected: 100_000_000_000_000, found: 1 })
        ));
    }

    #[test]
    fn test_symmetric_max_count_is_entry_count_error() {
        let text = format!(
            "%%MatrixMarket matrix coordinate real symmetric\n2 2 {}\n2 1 1.0\n",
            usize::MAX
        );
        assert!(matches!(
            read_coo(text.as_bytes()),
            Err(MtxError::EntryCount { expected: usize::MAX, found: 1 })
        ));
    }

    #[test]
    fn test_zero_index_rejected() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n0 1 1.0\n";
        assert!(matches!(
            read_coo(text.as_bytes()),
            Err(MtxError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_entry() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n3 1 1.0\n";
        assert!(matches!(read_coo(text.as_bytes()), Err(MtxError::Matrix(_))));
    }

    #[test]
    fn test_bad_value() {
        let text = "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 1 abc\n";
        assert!(matches!(read_coo(text.as_bytes()), Err(MtxError::Parse { .. })));
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "%%MatrixMarket matrix coordinate real general\n\
             % generated\n\
             3 3 3\n\
             1 1 1.0\n\
             2 2 2.0\n\
             3 1 3.0\n"
        )
        .unwrap();
        file.flush().unwrap();

        let mtx = MatrixMarketFile::open(file.path()).unwrap();
        assert_eq!(mtx.header.field, MtxField::Real);
        assert_eq!(mtx.shape(), MatrixShape::new(3, 3));
        assert_eq!(mtx.size.entries, 3);

        let coo = mtx.to_coo().unwrap();
        assert_eq!(elements(&coo), vec![(0, 0, 1.0), (1, 1, 2.0), (2, 0, 3.0)]);
    }

    #[test]
    fn test_open_reports_file_line_numbers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 1.0\n1 x 1.0\n"
        )
        .unwrap();
        file.flush().unwrap();

        let mtx = MatrixMarketFile::open(file.path()).unwrap();
        assert!(matches!(mtx.to_coo(), Err(MtxError::Parse { line: 4, .. })));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.mtx");
        assert!(matches!(MatrixMarketFile::open(&path), Err(MtxError::Io(_))));
    }
}
