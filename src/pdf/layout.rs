//! Fixed placements on the bundled template.
//!
//! Coordinates are PDF user-space points with the origin at the bottom-left
//! of the page. They are tied to the template artwork: a new template means
//! new numbers here.

use crate::request::Reason;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

const fn at(x: f32, y: f32) -> Point {
    Point { x, y }
}

pub const TEXT_FONT_SIZE: f32 = 12.0;
pub const CHECKBOX_FONT_SIZE: f32 = 20.0;
pub const CHECK_MARK: &str = "x";

pub const SIGN_QR_POSITION: Point = at(430.0, 95.0);
pub const SIGN_QR_SIZE: u32 = 120;
pub const PAGE_QR_POSITION: Point = at(50.0, 500.0);
pub const PAGE_QR_SIZE: u32 = 300;

/// Text slots on page 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FullName,
    BirthDate,
    BirthPlace,
    Address,
    SignCity,
    ExitDate,
    ExitTime,
}

impl TextField {
    pub const fn position(self) -> Point {
        match self {
            TextField::FullName => at(120.0, 695.0),
            TextField::BirthDate => at(120.0, 673.0),
            TextField::BirthPlace => at(300.0, 673.0),
            TextField::Address => at(130.0, 651.0),
            TextField::SignCity => at(110.0, 175.0),
            TextField::ExitDate => at(95.0, 152.0),
            TextField::ExitTime => at(255.0, 152.0),
        }
    }
}

pub const fn checkbox_position(reason: Reason) -> Point {
    match reason {
        Reason::Work => at(77.0, 577.0),
        Reason::Shopping => at(77.0, 532.0),
        Reason::Health => at(77.0, 476.0),
        Reason::Family => at(77.0, 435.0),
        Reason::Disability => at(77.0, 395.0),
        Reason::SportAnimals => at(77.0, 356.0),
        Reason::Convocation => at(77.0, 292.0),
        Reason::Missions => at(77.0, 254.0),
        Reason::Children => at(77.0, 209.0),
    }
}
