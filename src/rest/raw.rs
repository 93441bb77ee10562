//! Endpoint constructors; builders return raw JSON until converted with `.annual()` or `.quarterly()`
pub mod fundamentals;
