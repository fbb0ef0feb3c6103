//! Structural damage inference server.
//!
//! Serves three pretrained binary classifiers (LSTM, CNN, CNN+LSTM) over HTTP
//! for "Damaged"/"Undamaged" inference on sensor time-series windows. Models
//! are loaded once at startup from ONNX artifacts and shared read-only by all
//! requests.
//!
//! # Modules
//! - [`model`] - model variants, ONNX handles, and the startup registry
//! - [`normalize`] - request payloads to fixed-shape tensors
//! - [`inference`] - dispatch and threshold labeling
//! - [`server`] - HTTP surface (axum)
//! - [`error`] - shared error taxonomy

pub mod error;
pub mod inference;
pub mod model;
pub mod normalize;
pub mod server;
