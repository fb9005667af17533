pub mod tab_sync;
