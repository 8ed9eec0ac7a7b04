pub mod vod;
