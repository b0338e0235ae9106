mod types;
mod error;
mod handle;

pub use types::*;
pub use error::*;
pub use handle::*;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::Path;

use sp_matrix::{CooMatrix, SparseMatrix, SpmvBackend};

/// Execute a closure that returns an `SpStatus`, catching any panics
/// and converting them into `SpStatus::Failure`.
fn catch_panic<F: FnOnce() -> SpStatus + std::panic::UnwindSafe>(f: F) -> SpStatus {
    match std::panic::catch_unwind(f) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            SpStatus::Failure
        }
    }
}

/// Map a kernel result onto the C status code, recording the error text.
fn status_of(result: sp_matrix::Result<()>) -> SpStatus {
    match result {
        Ok(()) => SpStatus::Success,
        Err(e) => {
            set_last_error(e.to_string());
            SpStatus::Failure
        }
    }
}

/// Borrow `len` elements at `ptr`, allowing null only when `len` is 0.
unsafe fn slice_arg<'a, T>(ptr: *const T, len: usize, name: &str) -> Result<&'a [T], String> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(format!("{} is null", name));
    }
    Ok(std::slice::from_raw_parts(ptr, len))
}

unsafe fn slice_arg_mut<'a, T>(ptr: *mut T, len: usize, name: &str) -> Result<&'a mut [T], String> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(format!("{} is null", name));
    }
    Ok(std::slice::from_raw_parts_mut(ptr, len))
}

fn store_handle(matrix: SparseMatrix, out: *mut *mut SpMatrix) -> SpStatus {
    let handle = Box::new(SpMatrix::new(matrix));
    unsafe {
        *out = Box::into_raw(handle);
    }
    SpStatus::Success
}

/// Build a matrix handle from `nnz` zero-based coordinate triples.
///
/// With `SpFormat::CooSorted` the triples are sorted row-major. On success
/// the handle is written to `*out`; free it with `sp_matrix_destroy`.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_create(
    nrows: usize,
    ncols: usize,
    nnz: usize,
    rows: *const usize,
    cols: *const usize,
    values: *const f64,
    format: SpFormat,
    out: *mut *mut SpMatrix,
) -> SpStatus {
    catch_panic(|| {
        if out.is_null() {
            set_last_error("out is null".to_string());
            return SpStatus::Failure;
        }
        let triples = unsafe {
            (
                slice_arg(rows, nnz, "rows"),
                slice_arg(cols, nnz, "cols"),
                slice_arg(values, nnz, "values"),
            )
        };
        let (rows, cols, values) = match triples {
            (Ok(r), Ok(c), Ok(v)) => (r, c, v),
            (Err(msg), _, _) | (_, Err(msg), _) | (_, _, Err(msg)) => {
                set_last_error(msg);
                return SpStatus::Failure;
            }
        };

        let coo = match CooMatrix::from_triplets(nrows, ncols, rows, cols, values) {
            Ok(m) => m,
            Err(e) => {
                set_last_error(format!("invalid matrix: {}", e));
                return SpStatus::Failure;
            }
        };
        store_handle(SparseMatrix::from_coo(coo, format.into()), out)
    })
}

/// Load a Matrix Market coordinate file into a new matrix handle.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_load(
    path: *const c_char,
    format: SpFormat,
    out: *mut *mut SpMatrix,
) -> SpStatus {
    catch_panic(|| {
        if path.is_null() || out.is_null() {
            set_last_error("null argument".to_string());
            return SpStatus::Failure;
        }
        let path_str = match unsafe { CStr::from_ptr(path) }.to_str() {
            Ok(s) => s,
            Err(e) => {
                set_last_error(format!("invalid path: {}", e));
                return SpStatus::Failure;
            }
        };

        let coo = match sp_io::MatrixMarketFile::open(Path::new(path_str))
            .and_then(|mtx| mtx.to_coo())
        {
            Ok(m) => m,
            Err(e) => {
                set_last_error(format!("failed to load {}: {}", path_str, e));
                return SpStatus::Failure;
            }
        };
        store_handle(SparseMatrix::from_coo(coo, format.into()), out)
    })
}

/// Destroy a handle previously created by `sp_matrix_create` or
/// `sp_matrix_load`.
///
/// Passing a null pointer is a no-op and returns `SpStatus::Success`.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_destroy(matrix: *mut SpMatrix) -> SpStatus {
    if matrix.is_null() {
        return SpStatus::Success;
    }
    drop(Box::from_raw(matrix));
    SpStatus::Success
}

/// Number of rows, or 0 for a null handle.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_nrows(matrix: *const SpMatrix) -> usize {
    if matrix.is_null() {
        return 0;
    }
    (*matrix).matrix.shape().nrows
}

/// Number of columns, or 0 for a null handle.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_ncols(matrix: *const SpMatrix) -> usize {
    if matrix.is_null() {
        return 0;
    }
    (*matrix).matrix.shape().ncols
}

/// Number of stored triples, or 0 for a null handle.
#[no_mangle]
pub unsafe extern "C" fn sp_matrix_nnz(matrix: *const SpMatrix) -> usize {
    if matrix.is_null() {
        return 0;
    }
    (*matrix).matrix.nnz()
}

/// Shared body of the SpMV entry points: validate pointers, then run `op`.
///
/// `x` and `y` must not overlap.
unsafe fn with_operands<F>(
    matrix: *const SpMatrix,
    x: *const f64,
    x_len: usize,
    y: *mut f64,
    y_len: usize,
    op: F,
) -> SpStatus
where
    F: FnOnce(&SparseMatrix, &[f64], &mut [f64]) -> sp_matrix::Result<()>
        + std::panic::UnwindSafe,
{
    catch_panic(|| {
        if matrix.is_null() {
            set_last_error("matrix is null".to_string());
            return SpStatus::Failure;
        }
        let matrix = unsafe { &(*matrix).matrix };
        let x = match unsafe { slice_arg(x, x_len, "x") } {
            Ok(s) => s,
            Err(msg) => {
                set_last_error(msg);
                return SpStatus::Failure;
            }
        };
        let y = match unsafe { slice_arg_mut(y, y_len, "y") } {
            Ok(s) => s,
            Err(msg) => {
                set_last_error(msg);
                return SpStatus::Failure;
            }
        };
        status_of(op(matrix, x, y))
    })
}

/// y := A * x using `algo` and the kernel matching the handle's format.
#[no_mangle]
pub unsafe extern "C" fn sp_spmv(
    matrix: *const SpMatrix,
    algo: SpAlgorithm,
    x: *const f64,
    x_len: usize,
    y: *mut f64,
    y_len: usize,
) -> SpStatus {
    with_operands(matrix, x, x_len, y, y_len, |a, x, y| {
        sp_matrix::backend_for(algo.into()).spmv(a, x, y)
    })
}

/// y := A * x with the parallel COO kernel, whatever order the handle's
/// triples are in.
#[no_mangle]
pub unsafe extern "C" fn sp_spmv_coo_parallel(
    matrix: *const SpMatrix,
    x: *const f64,
    x_len: usize,
    y: *mut f64,
    y_len: usize,
) -> SpStatus {
    with_operands(matrix, x, x_len, y, y_len, |a, x, y| {
        sp_matrix::spmv_coo_parallel(a.as_coo(), x, y)
    })
}

/// y := A * x for a sorted COO matrix with the parallel kernel.
///
/// Element order does not change the COO product, so this forwards to
/// `sp_spmv_coo_parallel` and returns its status unchanged.
#[no_mangle]
pub unsafe extern "C" fn sp_spmv_coo_sorted_parallel(
    matrix: *const SpMatrix,
    x: *const f64,
    x_len: usize,
    y: *mut f64,
    y_len: usize,
) -> SpStatus {
    sp_spmv_coo_parallel(matrix, x, x_len, y, y_len)
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error on
/// this thread, or null if there is none. The caller must free the
/// returned string with `sp_free_string`.
#[no_mangle]
pub extern "C" fn sp_last_error() -> *mut c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `sp_last_error`.
#[no_mangle]
pub unsafe extern "C" fn sp_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
