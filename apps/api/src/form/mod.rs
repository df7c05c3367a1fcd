// Server-rendered form: category selector, per-category text fields,
// generated release and (when export succeeds) a download link.

pub mod handlers;
pub mod pages;
