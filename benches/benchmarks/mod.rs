pub mod lca;
pub mod union_find;
