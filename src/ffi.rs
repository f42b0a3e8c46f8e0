use std::{ffi::CString, os::raw::c_char};

/// Build a vector of pointers to c-style strings from a slice of rust strings.
///
/// Unsafe because the returned vector of pointers is only valid while the
/// cstrings are alive.
pub unsafe fn to_os_ptrs(
    strings: &[String],
) -> (Vec<CString>, Vec<*const c_char>) {
    let cstrings = strings
        .iter()
        .cloned()
        .map(|str| CString::new(str).unwrap())
        .collect::<Vec<CString>>();
    let ptrs = cstrings
        .iter()
        .map(|cstr| cstr.as_ptr())
        .collect::<Vec<*const c_char>>();
    (cstrings, ptrs)
}

/// Copy a null-terminated c-style string out of a fixed-size buffer like the
/// ones found in Vulkan property structs.
pub fn string_from_i8_buffer(buffer: &[c_char]) -> String {
    buffer
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8 as char)
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn pointers_round_trip_through_cstr() {
        let strings =
            vec!["VK_LAYER_KHRONOS_validation".to_owned(), "two".to_owned()];
        let (_keep_alive, ptrs) = unsafe { to_os_ptrs(&strings) };
        assert_eq!(ptrs.len(), strings.len());
        for (ptr, expected) in ptrs.iter().zip(strings.iter()) {
            let back = unsafe { CStr::from_ptr(*ptr) };
            assert_eq!(back.to_str().unwrap(), expected);
        }
    }

    #[test]
    fn fixed_buffers_stop_at_the_null_terminator() {
        let mut buffer = [0 as std::os::raw::c_char; 8];
        for (index, byte) in b"abc".iter().enumerate() {
            buffer[index] = *byte as std::os::raw::c_char;
        }
        assert_eq!(string_from_i8_buffer(&buffer), "abc");
    }
}
