//! Swingline gameplay library
//!
//! A web-swinging side-scroller: cut and re-shoot a rope anchored to an
//! endless ceiling to convert pendulum momentum into horizontal distance.
//! Rapier supplies the rigid bodies and joints; this crate supplies the
//! rope lifecycle, scoring, and round state machine on top.

pub mod ceiling;
pub mod config;
pub mod constants;
pub mod error;
pub mod menu;
pub mod player;
pub mod rendering;
pub mod round;
pub mod score;
pub mod web;
