pub(crate) mod zig;
pub(crate) mod zon;
