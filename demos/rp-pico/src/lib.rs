#![no_std]

//! RP2040 adapters for the outdoor-light capability traits.

pub mod adc;
pub mod pwm;
