pub mod clock;
pub mod db_utils;
pub mod editor;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod notice;
pub mod stats;
