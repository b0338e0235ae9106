use std::cell::RefCell;
use std::ffi::CString;

thread_local! {
    /// Message of the most recent failed call on this thread.
    static PENDING: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Record `msg` as the failure reason returned by the next `sp_last_error`.
///
/// Interior NUL bytes cannot cross the C boundary, so they are replaced
/// with U+FFFD rather than dropping the whole message.
pub fn set_last_error(msg: impl Into<String>) {
    let mut msg = msg.into();
    if msg.contains('\0') {
        msg = msg.replace('\0', "\u{FFFD}");
    }
    let msg = CString::new(msg).unwrap_or_default();
    PENDING.with(|slot| *slot.borrow_mut() = Some(msg));
}

/// Hand the pending message to the caller and clear it.
pub fn take_last_error() -> Option<CString> {
    PENDING.with(|slot| slot.borrow_mut().take())
}
