// TrueSight adapter: image moderation scores for an oracle network.
//
// This is the library root. A content hash goes in, the image is fetched
// from IPFS, classified by Rekognition, and the labels come back out as a
// five-field score string.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handler;
pub mod ipfs;
pub mod moderation;

#[cfg(feature = "lambda")]
pub mod runtime;

#[cfg(feature = "web")]
pub mod web;
