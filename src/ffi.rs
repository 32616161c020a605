//! The C interface exposed to host runtimes embedding this library.
//!
//! All functions signal failure through null pointers or negative return
//! values; buffers handed out here must be returned through
//! [`bedrock_buffer_free`].

use std::ffi::CStr;
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;
use std::slice;

use super::file::{self, FileHandle, Flags, SeekOrigin};
use super::process;

/// An opaque file handle shared with the host runtime.
pub struct RawFileHandle {
    handle: FileHandle,
}

fn string_argument<'a>(raw_value: *const c_char) -> Option<&'a str> {
    if raw_value.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(raw_value) }.to_str().ok()
}

fn path_argument<'a>(raw_path: *const c_char) -> Option<&'a Path> {
    string_argument(raw_path).map(Path::new)
}

fn leak_buffer(data: Vec<u8>, output_length: *mut usize) -> *mut u8 {
    let length = data.len();
    let pointer = Box::leak(data.into_boxed_slice()).as_mut_ptr();
    if !output_length.is_null() {
        unsafe { *output_length = length };
    }
    pointer
}

/// Opens the file at `path` with a symbolic access mode such as "r", "w" or
/// "a". Returns a null pointer on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_open(
    path: *const c_char,
    mode: *const c_char,
) -> *mut RawFileHandle {
    let path = match path_argument(path) {
        Some(value) => value,
        None => return ptr::null_mut(),
    };
    let mode = match string_argument(mode) {
        Some(value) => value,
        None => return ptr::null_mut(),
    };
    match FileHandle::open(path, mode) {
        Ok(handle) => Box::into_raw(Box::new(RawFileHandle { handle })),
        Err(_) => ptr::null_mut(),
    }
}

/// Opens the file at `path` with a combination of primitive access flags.
/// Returns a null pointer on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_open_flags(
    path: *const c_char,
    flags: i32,
) -> *mut RawFileHandle {
    let path = match path_argument(path) {
        Some(value) => value,
        None => return ptr::null_mut(),
    };
    match FileHandle::open(path, Flags::from_bits_truncate(flags)) {
        Ok(handle) => Box::into_raw(Box::new(RawFileHandle { handle })),
        Err(_) => ptr::null_mut(),
    }
}

/// Reads up to `count` bytes into `buffer`. Returns the number of bytes
/// read, 0 at the end of the stream, or -1 on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_read(
    handle: *mut RawFileHandle,
    buffer: *mut u8,
    count: usize,
) -> isize {
    if handle.is_null() || buffer.is_null() {
        return -1;
    }
    let handle = unsafe { &mut (*handle).handle };
    match handle.read(count) {
        Ok(Some(data)) => {
            let target = unsafe { slice::from_raw_parts_mut(buffer, count) };
            target[..data.len()].copy_from_slice(&data);
            data.len() as isize
        }
        Ok(None) => 0,
        Err(_) => -1,
    }
}

/// Reads all remaining bytes and stores their count in `output_length`.
/// Returns a null pointer on failure; free the buffer with
/// [`bedrock_buffer_free`].
#[no_mangle]
pub extern "C" fn bedrock_file_read_all(
    handle: *mut RawFileHandle,
    output_length: *mut usize,
) -> *mut u8 {
    if handle.is_null() {
        return ptr::null_mut();
    }
    let handle = unsafe { &mut (*handle).handle };
    match handle.read_all() {
        Ok(data) => leak_buffer(data, output_length),
        Err(_) => ptr::null_mut(),
    }
}

/// Writes `count` bytes from `data`. Returns the number of bytes accepted
/// by the OS or -1 on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_write(
    handle: *mut RawFileHandle,
    data: *const u8,
    count: usize,
) -> isize {
    if handle.is_null() || data.is_null() {
        return -1;
    }
    let handle = unsafe { &mut (*handle).handle };
    let data = unsafe { slice::from_raw_parts(data, count) };
    match handle.write(data) {
        Ok(written) => written as isize,
        Err(_) => -1,
    }
}

/// Moves the kernel offset to `offset` relative to the whence constant
/// `origin` (0 = start, 1 = current, 2 = end). Returns 0 on success and -1
/// on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_seek(
    handle: *mut RawFileHandle,
    offset: i64,
    origin: i32,
) -> i64 {
    if handle.is_null() {
        return -1;
    }
    let handle = unsafe { &mut (*handle).handle };
    let origin = match SeekOrigin::from_raw(origin) {
        Ok(value) => value,
        Err(_) => return -1,
    };
    match handle.seek(offset, origin) {
        Ok(result) => result,
        Err(_) => -1,
    }
}

/// Moves the kernel offset back to the start of the file. Returns 0 on
/// success and -1 on failure.
#[no_mangle]
pub extern "C" fn bedrock_file_rewind(handle: *mut RawFileHandle) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let handle = unsafe { &mut (*handle).handle };
    match handle.rewind() {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Returns the OS-assigned descriptor id of the handle, or -1 if the handle
/// is closed or invalid.
#[no_mangle]
pub extern "C" fn bedrock_file_fileno(handle: *const RawFileHandle) -> i32 {
    if handle.is_null() {
        return -1;
    }
    let handle = unsafe { &(*handle).handle };
    match handle.fileno() {
        Ok(descriptor) => descriptor.0,
        Err(_) => -1,
    }
}

/// Releases the descriptor of the handle. Closing twice is a no-op.
#[no_mangle]
pub extern "C" fn bedrock_file_close(handle: *mut RawFileHandle) {
    if !handle.is_null() {
        unsafe { &mut (*handle).handle }.close();
    }
}

/// Destroys a handle created by one of the open functions, releasing the
/// descriptor if it is still held.
#[no_mangle]
pub extern "C" fn bedrock_file_free(handle: *mut RawFileHandle) {
    if !handle.is_null() {
        unsafe {
            let _ = Box::from_raw(handle);
        }
    }
}

/// Checks whether `path` exists. Returns 1, 0, or -1 for an invalid path
/// argument.
#[no_mangle]
pub extern "C" fn bedrock_path_exists(path: *const c_char) -> i32 {
    match path_argument(path) {
        Some(path) => file::exists(path) as i32,
        None => -1,
    }
}

/// Removes the file at `path`. Returns 0 on success and -1 on failure,
/// including a missing path.
#[no_mangle]
pub extern "C" fn bedrock_path_unlink(path: *const c_char) -> i32 {
    let path = match path_argument(path) {
        Some(value) => value,
        None => return -1,
    };
    match file::unlink(path) {
        Ok(()) => 0,
        Err(_) => -1,
    }
}

/// Expands `path` into an absolute path, resolved against `base` when the
/// latter is non-null. Stores the length in `output_length` and returns a
/// buffer to free with [`bedrock_buffer_free`], or null on failure.
#[no_mangle]
pub extern "C" fn bedrock_path_expand(
    path: *const c_char,
    base: *const c_char,
    output_length: *mut usize,
) -> *mut u8 {
    let path = match path_argument(path) {
        Some(value) => value,
        None => return ptr::null_mut(),
    };
    let base = if base.is_null() {
        None
    } else {
        match path_argument(base) {
            Some(value) => Some(value),
            None => return ptr::null_mut(),
        }
    };
    match file::expand_path(path, base) {
        Ok(expanded) => leak_buffer(expanded.into_bytes(), output_length),
        Err(_) => ptr::null_mut(),
    }
}

/// Returns a buffer handed out by this library.
#[no_mangle]
pub extern "C" fn bedrock_buffer_free(buffer: *mut u8, length: usize) {
    if !buffer.is_null() {
        unsafe {
            let _ = Box::from_raw(slice::from_raw_parts_mut(buffer, length));
        }
    }
}

/// Extracts the logical exit code from a raw wait status.
#[no_mangle]
pub extern "C" fn bedrock_status_exit_code(raw_status: i32) -> i32 {
    process::ExitStatus::from_raw(raw_status).exit_code()
}

/// Publishes a raw wait status as the status of the most recently completed
/// command.
#[no_mangle]
pub extern "C" fn bedrock_status_record(raw_status: i32) {
    process::set_last_status(process::ExitStatus::from_raw(raw_status));
}

/// Stores the raw wait status of the most recently completed command in
/// `output_status`. Returns 1 when a status was recorded and 0 otherwise.
#[no_mangle]
pub extern "C" fn bedrock_last_status(output_status: *mut i32) -> i32 {
    match process::last_status() {
        Some(status) if !output_status.is_null() => {
            unsafe { *output_status = status.to_raw() };
            1
        }
        Some(_) => 1,
        None => 0,
    }
}
