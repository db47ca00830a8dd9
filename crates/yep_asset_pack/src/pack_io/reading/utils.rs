/// Reading a compile-time constant amount of bytes from a reader.
///
/// # Parameters
/// - `$impl_read`: the reader to read from
/// - `$count`: the amount of bytes to read (has to be a constant)
///
/// # Errors
/// [`std::io::Error`] raised from reading the file.
macro_rules! read_bytes {
    ($impl_read:expr, $count:expr) => {{
        let mut buf = [0u8; $count];
        match $impl_read.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) => Err(e),
        }
    }};
}

pub(crate) use read_bytes;
