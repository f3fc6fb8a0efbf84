// ── Editor control ────────────────────────────────────────────────────────────
//
// Safe wrapper over the RichEdit child window that holds the pad text.
// Callers use `RichEditView`; they never send RichEdit messages directly.

pub mod richedit;
