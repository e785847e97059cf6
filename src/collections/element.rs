use std::fmt::Debug;

/// A marker for values that can be stored in the queues of this crate.<br/>
/// このクレートのキューに格納できる値のマーカートレイト。
///
/// `Clone` is part of the contract: the lock-free queue hands out clones of
/// stored values so that a node is never torn while another thread still
/// observes it.
pub trait Element: Debug + Clone + Send + Sync + 'static {}

impl Element for i8 {}
impl Element for i16 {}
impl Element for i32 {}
impl Element for i64 {}
impl Element for u8 {}
impl Element for u16 {}
impl Element for u32 {}
impl Element for u64 {}
impl Element for usize {}
impl Element for isize {}
impl Element for bool {}
impl Element for char {}
impl Element for String {}
impl Element for &'static str {}
