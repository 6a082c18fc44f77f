/// Converts raw string bytes from a row into text.
///
/// Decoders may keep scratch state between calls, so each export worker owns
/// its own instance.
pub trait TextDecoder {
    /// Append the text form of `bytes` to `out`.
    fn decode_into(&mut self, bytes: &[u8], out: &mut String);
}

/// Lossy UTF-8 decoder.
///
/// Control bytes of embedded markup are valid UTF-8 code points and pass
/// through untouched; only byte sequences that are not UTF-8 are replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct Utf8TextDecoder;

impl TextDecoder for Utf8TextDecoder {
    fn decode_into(&mut self, bytes: &[u8], out: &mut String) {
        out.push_str(&String::from_utf8_lossy(bytes));
    }
}

impl<D: TextDecoder + ?Sized> TextDecoder for &mut D {
    fn decode_into(&mut self, bytes: &[u8], out: &mut String) {
        (**self).decode_into(bytes, out);
    }
}

impl<D: TextDecoder + ?Sized> TextDecoder for Box<D> {
    fn decode_into(&mut self, bytes: &[u8], out: &mut String) {
        (**self).decode_into(bytes, out);
    }
}
