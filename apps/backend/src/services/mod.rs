pub mod pack_store;
