pub mod a001_predefined_item;
