#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use ark_reflect as reflect;
pub use ark_serial as serial;
pub use ark_utils as utils;
