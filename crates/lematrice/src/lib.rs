// lematrice - Matrix & Factorization Core
//
// *La Matrice* (The Matrix) - Rectangular matrix type and Gram-Schmidt QR engine

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod matrix;
pub mod qr;

pub use matrix::{Matrix, MatrixError};
pub use qr::{qr_factorize, RANK_TOLERANCE};
