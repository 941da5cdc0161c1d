// Copyright (c) 2022, BlockProject 3D
//
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
//     * Redistributions of source code must retain the above copyright notice,
//       this list of conditions and the following disclaimer.
//     * Redistributions in binary form must reproduce the above copyright notice,
//       this list of conditions and the following disclaimer in the documentation
//       and/or other materials provided with the distribution.
//     * Neither the name of BlockProject 3D nor the names of its contributors
//       may be used to endorse or promote products derived from this software
//       without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
// "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
// LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
// A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR
// CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
// EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO,
// PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR
// PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF
// LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING
// NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
// SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::fmt::{Display, Formatter};

use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colour
{
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32
}

static PREDEFINED: phf::Map<&'static str, Colour> = phf_map! {
    "black" => Colour::rgb(0.0, 0.0, 0.0),
    "white" => Colour::rgb(1.0, 1.0, 1.0),
    "red" => Colour::rgb(1.0, 0.0, 0.0),
    "green" => Colour::rgb(0.0, 1.0, 0.0),
    "blue" => Colour::rgb(0.0, 0.0, 1.0),
    "yellow" => Colour::rgb(1.0, 1.0, 0.0),
    "cyan" => Colour::rgb(0.0, 1.0, 1.0),
    "magenta" => Colour::rgb(1.0, 0.0, 1.0),
    "grey" => Colour::rgb(0.5, 0.5, 0.5),
    "gray" => Colour::rgb(0.5, 0.5, 0.5),
    "orange" => Colour::rgb(1.0, 0.5, 0.0),
    "brown" => Colour::rgb(0.5, 0.25, 0.0),
    "purple" => Colour::rgb(0.5, 0.0, 0.5),
    "pink" => Colour::rgb(1.0, 0.75, 0.8),
    "transparent" => Colour::rgba(0.0, 0.0, 0.0, 0.0)
};

fn hex_component(code: &str) -> Option<f32>
{
    u8::from_str_radix(code, 16).ok().map(|v| v as f32 / 255.0)
}

impl Colour
{
    pub const fn rgb(r: f32, g: f32, b: f32) -> Colour
    {
        Colour { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Colour
    {
        Colour { r, g, b, a }
    }

    pub fn from_name(name: &str) -> Option<Colour>
    {
        PREDEFINED.get(name.to_lowercase().as_str()).copied()
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` notation.
    pub fn from_hex(code: &str) -> Option<Colour>
    {
        let digits = code.strip_prefix('#')?;
        if digits.len() != 6 && digits.len() != 8 {
            return None;
        }
        let r = hex_component(&digits[0..2])?;
        let g = hex_component(&digits[2..4])?;
        let b = hex_component(&digits[4..6])?;
        let a = if digits.len() == 8 {
            hex_component(&digits[6..8])?
        } else {
            1.0
        };
        Some(Colour { r, g, b, a })
    }
}

impl Display for Colour
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position
{
    pub x: i32,
    pub y: i32
}

impl Display for Position
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size
{
    pub width: u32,
    pub height: u32
}

impl Display for Size
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rectangle
{
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32
}

impl Display for Rectangle
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point2<T>
{
    pub x: T,
    pub y: T
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point3<T>
{
    pub x: T,
    pub y: T,
    pub z: T
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point4<T>
{
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T
}

impl<T: Display> Display for Point2<T>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl<T: Display> Display for Point3<T>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl<T: Display> Display for Point4<T>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        write!(f, "{} {} {} {}", self.x, self.y, self.z, self.w)
    }
}

pub type Point2i = Point2<i32>;
pub type Point3i = Point3<i32>;
pub type Point4i = Point4<i32>;
pub type Point2f = Point2<f32>;
pub type Point3f = Point3<f32>;
pub type Point4f = Point4<f32>;

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn colour_from_name()
    {
        assert_eq!(Colour::from_name("red"), Some(Colour::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Colour::from_name("RED"), Some(Colour::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Colour::from_name("not_a_colour"), None);
    }

    #[test]
    fn colour_from_hex()
    {
        assert_eq!(Colour::from_hex("#FF0000"), Some(Colour::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Colour::from_hex("#00FF0000"), Some(Colour::rgba(0.0, 1.0, 0.0, 0.0)));
        assert_eq!(Colour::from_hex("FF0000"), None);
        assert_eq!(Colour::from_hex("#F00"), None);
        assert_eq!(Colour::from_hex("#GG0000"), None);
    }

    #[test]
    fn display()
    {
        assert_eq!(Colour::rgb(1.0, 0.5, 0.0).to_string(), "1 0.5 0 1");
        assert_eq!(Position { x: -4, y: 2 }.to_string(), "-4 2");
        assert_eq!(Size { width: 800, height: 600 }.to_string(), "800 600");
        assert_eq!(
            Rectangle { left: 0, top: 0, right: 32, bottom: 16 }.to_string(),
            "0 0 32 16"
        );
        assert_eq!(Point3 { x: 1.0, y: 2.5, z: -3.0 }.to_string(), "1 2.5 -3");
    }
}
