//! 습공기 계산에 쓰이는 영국 단위계(IP) 보조 함수 모음.

pub mod pressure;
pub mod temperature;

pub use pressure::{standard_atmosphere_psi, SQ_IN_PER_SQ_FT};
pub use temperature::{to_rankine, RANKINE_OFFSET};
