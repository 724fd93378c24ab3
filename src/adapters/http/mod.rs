//! HTTP download transport

pub mod downloader;

pub use downloader::HttpDownloader;
