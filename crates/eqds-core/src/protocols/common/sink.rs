/// Append-only destination for printed packet text.
///
/// Decoders write short tokens as they go; the next-layer printer writes
/// into the same sink so its output lands right after the EQDS summary.
pub trait TextSink {
    fn push(&mut self, text: &str);
}

impl TextSink for String {
    fn push(&mut self, text: &str) {
        self.push_str(text);
    }
}
