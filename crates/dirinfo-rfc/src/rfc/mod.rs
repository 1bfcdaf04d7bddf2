pub mod dirinfo;
