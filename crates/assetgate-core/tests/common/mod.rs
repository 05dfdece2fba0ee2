pub mod asset_tree;
