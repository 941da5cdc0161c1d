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

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use regex::Regex;

use crate::param::Value;
use crate::types::{Colour, Point2, Point3, Point4, Position, Rectangle, Size};

fn is_separator(chr: char) -> bool
{
    chr.is_whitespace() || chr == ',' || chr == ';'
}

/// Removes and returns the first whitespace-delimited token.
fn take_token(params: &mut String) -> Option<String>
{
    let skip = params
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(params.len());
    params.replace_range(..skip, "");
    if params.is_empty() {
        return None;
    }
    let end = params.find(char::is_whitespace).unwrap_or(params.len());
    let token: String = params.drain(..end).collect();
    Some(token)
}

/// Like take_token but numbers may also be separated by ',' or ';'.
fn take_number_token(params: &mut String) -> Option<String>
{
    let skip = params.find(|c: char| !is_separator(c)).unwrap_or(params.len());
    params.replace_range(..skip, "");
    if params.is_empty() {
        return None;
    }
    let end = params.find(is_separator).unwrap_or(params.len());
    let token: String = params.drain(..end).collect();
    Some(token)
}

/// A double-quoted run, or a plain token.
fn take_string(params: &mut String) -> Option<String>
{
    let skip = params
        .find(|c: char| !c.is_whitespace())
        .unwrap_or(params.len());
    params.replace_range(..skip, "");
    if params.starts_with('"') {
        let close = params[1..].find('"')?;
        let token = params[1..close + 1].to_owned();
        params.replace_range(..close + 2, "");
        Some(token)
    } else {
        take_token(params)
    }
}

fn signed_value<T: FromStr>(token: &str) -> Option<T>
{
    let re = Regex::new(r"^[+-]?\d+$").unwrap();
    if re.is_match(token) {
        token.parse().ok()
    } else {
        None
    }
}

fn unsigned_value<T: FromStr>(token: &str) -> Option<T>
{
    let re = Regex::new(r"^\+?\d+$").unwrap();
    if re.is_match(token) {
        token.parse().ok()
    } else {
        None
    }
}

fn float_value<T: FromStr>(token: &str) -> Option<T>
{
    let re = Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap();
    if re.is_match(token) {
        token.parse().ok()
    } else {
        None
    }
}

fn take_signed<T: FromStr>(params: &mut String) -> Option<T>
{
    signed_value(&take_number_token(params)?)
}

fn take_unsigned<T: FromStr>(params: &mut String) -> Option<T>
{
    unsigned_value(&take_number_token(params)?)
}

fn take_float<T: FromStr>(params: &mut String) -> Option<T>
{
    float_value(&take_number_token(params)?)
}

fn take_bool(params: &mut String) -> Option<bool>
{
    match take_token(params)?.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None
    }
}

fn take_colour(params: &mut String) -> Option<Colour>
{
    let mut probe = params.clone();
    let token = take_token(&mut probe)?;
    if token.starts_with('#') {
        let colour = Colour::from_hex(&token)?;
        *params = probe;
        return Some(colour);
    }
    if let Some(colour) = Colour::from_name(&token) {
        *params = probe;
        return Some(colour);
    }
    let r = take_float(params)?;
    let g = take_float(params)?;
    let b = take_float(params)?;
    // The alpha component is optional.
    let mut probe = params.clone();
    match take_float(&mut probe) {
        Some(a) => {
            *params = probe;
            Some(Colour::rgba(r, g, b, a))
        },
        None => Some(Colour::rgb(r, g, b))
    }
}

fn take_bits<T: std::ops::BitOrAssign + Default + Copy>(
    params: &mut String,
    map: &HashMap<String, T>
) -> Option<T>
{
    let token = take_token(params)?;
    let mut value = T::default();
    for name in token.split('|') {
        value |= *map.get(name.trim())?;
    }
    Some(value)
}

/// The expected kind of one positional directive parameter.
///
/// Parsing consumes a prefix of the remaining raw parameter text and yields
/// the matching [Value] variant; on failure the text is left untouched.
#[derive(Debug, Clone)]
pub enum Descriptor
{
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float,
    Double,
    Text,
    Name,
    Path,
    CheckedText(HashMap<String, u32>),
    Bitfield32(HashMap<String, u32>),
    Bitfield64(HashMap<String, u64>),
    Colour,
    Point2I,
    Point3I,
    Point4I,
    Point2F,
    Point3F,
    Point4F,
    Size,
    Position,
    Rectangle
}

impl Descriptor
{
    pub fn kind_name(&self) -> &'static str
    {
        match self {
            Descriptor::Bool => "boolean",
            Descriptor::Int8 => "8 bits signed integer",
            Descriptor::Int16 => "16 bits signed integer",
            Descriptor::Int32 => "32 bits signed integer",
            Descriptor::Int64 => "64 bits signed integer",
            Descriptor::UInt8 => "8 bits unsigned integer",
            Descriptor::UInt16 => "16 bits unsigned integer",
            Descriptor::UInt32 => "32 bits unsigned integer",
            Descriptor::UInt64 => "64 bits unsigned integer",
            Descriptor::Float => "simple precision floating point",
            Descriptor::Double => "double precision floating point",
            Descriptor::Text => "text",
            Descriptor::Name => "name",
            Descriptor::Path => "path",
            Descriptor::CheckedText(_) => "checked text",
            Descriptor::Bitfield32(_) => "32 bits bitwise ORed checked texts",
            Descriptor::Bitfield64(_) => "64 bits bitwise ORed checked texts",
            Descriptor::Colour => "colour",
            Descriptor::Point2I => "2 integers point",
            Descriptor::Point3I => "3 integers point",
            Descriptor::Point4I => "4 integers point",
            Descriptor::Point2F => "2 floats point",
            Descriptor::Point3F => "3 floats point",
            Descriptor::Point4F => "4 floats point",
            Descriptor::Size => "size",
            Descriptor::Position => "position",
            Descriptor::Rectangle => "rectangle"
        }
    }

    pub fn parse(&self, params: &mut String) -> Option<Value>
    {
        let mut work = params.clone();
        let value = self.parse_into(&mut work)?;
        *params = work;
        Some(value)
    }

    fn parse_into(&self, work: &mut String) -> Option<Value>
    {
        match self {
            Descriptor::Bool => take_bool(work).map(Value::Bool),
            Descriptor::Int8 => take_signed(work).map(Value::Int8),
            Descriptor::Int16 => take_signed(work).map(Value::Int16),
            Descriptor::Int32 => take_signed(work).map(Value::Int32),
            Descriptor::Int64 => take_signed(work).map(Value::Int64),
            Descriptor::UInt8 => take_unsigned(work).map(Value::UInt8),
            Descriptor::UInt16 => take_unsigned(work).map(Value::UInt16),
            Descriptor::UInt32 => take_unsigned(work).map(Value::UInt32),
            Descriptor::UInt64 => take_unsigned(work).map(Value::UInt64),
            Descriptor::Float => take_float(work).map(Value::Float),
            Descriptor::Double => take_float(work).map(Value::Double),
            Descriptor::Text => {
                let mut text = std::mem::take(work);
                let trimmed = text.trim();
                if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
                    text = trimmed[1..trimmed.len() - 1].to_owned();
                } else {
                    text = trimmed.to_owned();
                }
                Some(Value::Text(text))
            },
            Descriptor::Name => take_string(work).map(Value::Name),
            Descriptor::Path => take_string(work).map(|v| Value::Path(PathBuf::from(v))),
            Descriptor::CheckedText(map) => {
                let token = take_token(work)?;
                map.get(&token).copied().map(Value::CheckedText)
            },
            Descriptor::Bitfield32(map) => take_bits(work, map).map(Value::Bitfield32),
            Descriptor::Bitfield64(map) => take_bits(work, map).map(Value::Bitfield64),
            Descriptor::Colour => take_colour(work).map(Value::Colour),
            Descriptor::Point2I => {
                let x = take_signed(work)?;
                let y = take_signed(work)?;
                Some(Value::Point2I(Point2 { x, y }))
            },
            Descriptor::Point3I => {
                let x = take_signed(work)?;
                let y = take_signed(work)?;
                let z = take_signed(work)?;
                Some(Value::Point3I(Point3 { x, y, z }))
            },
            Descriptor::Point4I => {
                let x = take_signed(work)?;
                let y = take_signed(work)?;
                let z = take_signed(work)?;
                let w = take_signed(work)?;
                Some(Value::Point4I(Point4 { x, y, z, w }))
            },
            Descriptor::Point2F => {
                let x = take_float(work)?;
                let y = take_float(work)?;
                Some(Value::Point2F(Point2 { x, y }))
            },
            Descriptor::Point3F => {
                let x = take_float(work)?;
                let y = take_float(work)?;
                let z = take_float(work)?;
                Some(Value::Point3F(Point3 { x, y, z }))
            },
            Descriptor::Point4F => {
                let x = take_float(work)?;
                let y = take_float(work)?;
                let z = take_float(work)?;
                let w = take_float(work)?;
                Some(Value::Point4F(Point4 { x, y, z, w }))
            },
            Descriptor::Size => {
                let width = take_unsigned(work)?;
                let height = take_unsigned(work)?;
                Some(Value::Size(Size { width, height }))
            },
            Descriptor::Position => {
                let x = take_signed(work)?;
                let y = take_signed(work)?;
                Some(Value::Position(Position { x, y }))
            },
            Descriptor::Rectangle => {
                let left = take_signed(work)?;
                let top = take_signed(work)?;
                let right = take_signed(work)?;
                let bottom = take_signed(work)?;
                Some(Value::Rectangle(Rectangle { left, top, right, bottom }))
            }
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn checked_map() -> HashMap<String, u32>
    {
        let mut map = HashMap::new();
        map.insert("nearest".into(), 0);
        map.insert("linear".into(), 1);
        map
    }

    fn bits_map() -> HashMap<String, u32>
    {
        let mut map = HashMap::new();
        map.insert("colour".into(), 1);
        map.insert("depth".into(), 2);
        map.insert("stencil".into(), 4);
        map
    }

    #[test]
    fn scalars()
    {
        let mut params = String::from("-12 42 2.5 true rest");
        assert_eq!(Descriptor::Int32.parse(&mut params), Some(Value::Int32(-12)));
        assert_eq!(Descriptor::UInt8.parse(&mut params), Some(Value::UInt8(42)));
        assert_eq!(Descriptor::Float.parse(&mut params), Some(Value::Float(2.5)));
        assert_eq!(Descriptor::Bool.parse(&mut params), Some(Value::Bool(true)));
        assert_eq!(params.trim(), "rest");
    }

    #[test]
    fn scalar_failures()
    {
        let mut params = String::from("notanumber 12");
        assert_eq!(Descriptor::Int32.parse(&mut params), None);
        // A failed parse must leave the tail untouched.
        assert_eq!(params, "notanumber 12");
        assert_eq!(Descriptor::UInt32.parse(&mut String::from("-5")), None);
        assert_eq!(Descriptor::UInt8.parse(&mut String::from("256")), None);
        assert_eq!(Descriptor::Bool.parse(&mut String::from("maybe")), None);
        assert_eq!(Descriptor::Float.parse(&mut String::new()), None);
    }

    #[test]
    fn text_takes_everything()
    {
        let mut params = String::from("  some text with spaces  ");
        assert_eq!(
            Descriptor::Text.parse(&mut params),
            Some(Value::Text("some text with spaces".into()))
        );
        assert!(params.is_empty());
        let mut params = String::from("\"quoted text\"");
        assert_eq!(Descriptor::Text.parse(&mut params), Some(Value::Text("quoted text".into())));
    }

    #[test]
    fn names_and_paths()
    {
        let mut params = String::from("\"Blue Material\" trailing");
        assert_eq!(
            Descriptor::Name.parse(&mut params),
            Some(Value::Name("Blue Material".into()))
        );
        assert_eq!(params.trim(), "trailing");
        let mut params = String::from("textures/stone.png");
        assert_eq!(
            Descriptor::Path.parse(&mut params),
            Some(Value::Path(PathBuf::from("textures/stone.png")))
        );
        assert_eq!(Descriptor::Name.parse(&mut String::from("\"unterminated")), None);
    }

    #[test]
    fn checked_text()
    {
        let map = checked_map();
        let mut params = String::from("linear next");
        assert_eq!(
            Descriptor::CheckedText(map.clone()).parse(&mut params),
            Some(Value::CheckedText(1))
        );
        assert_eq!(params.trim(), "next");
        assert_eq!(Descriptor::CheckedText(map).parse(&mut String::from("cubic")), None);
    }

    #[test]
    fn bitfields()
    {
        let map = bits_map();
        let mut params = String::from("colour|depth");
        assert_eq!(
            Descriptor::Bitfield32(map.clone()).parse(&mut params),
            Some(Value::Bitfield32(3))
        );
        assert_eq!(
            Descriptor::Bitfield32(map.clone()).parse(&mut String::from("stencil")),
            Some(Value::Bitfield32(4))
        );
        assert_eq!(
            Descriptor::Bitfield32(map).parse(&mut String::from("colour|unknown")),
            None
        );
    }

    #[test]
    fn colours()
    {
        assert_eq!(
            Descriptor::Colour.parse(&mut String::from("red")),
            Some(Value::Colour(Colour::rgb(1.0, 0.0, 0.0)))
        );
        assert_eq!(
            Descriptor::Colour.parse(&mut String::from("#00FF00")),
            Some(Value::Colour(Colour::rgb(0.0, 1.0, 0.0)))
        );
        assert_eq!(
            Descriptor::Colour.parse(&mut String::from("0.5 0.5 1.0")),
            Some(Value::Colour(Colour::rgb(0.5, 0.5, 1.0)))
        );
        assert_eq!(
            Descriptor::Colour.parse(&mut String::from("1 0 0 0.5")),
            Some(Value::Colour(Colour::rgba(1.0, 0.0, 0.0, 0.5)))
        );
        // A non-numeric fourth token must stay in the tail.
        let mut params = String::from("1 0 0 ambient");
        assert_eq!(
            Descriptor::Colour.parse(&mut params),
            Some(Value::Colour(Colour::rgb(1.0, 0.0, 0.0)))
        );
        assert_eq!(params.trim(), "ambient");
    }

    #[test]
    fn geometry()
    {
        assert_eq!(
            Descriptor::Point3F.parse(&mut String::from("1.0, 2.0, 3.0")),
            Some(Value::Point3F(Point3 { x: 1.0, y: 2.0, z: 3.0 }))
        );
        assert_eq!(
            Descriptor::Size.parse(&mut String::from("800 600")),
            Some(Value::Size(Size { width: 800, height: 600 }))
        );
        assert_eq!(
            Descriptor::Position.parse(&mut String::from("-5 10")),
            Some(Value::Position(Position { x: -5, y: 10 }))
        );
        assert_eq!(
            Descriptor::Rectangle.parse(&mut String::from("0 0 32 16")),
            Some(Value::Rectangle(Rectangle { left: 0, top: 0, right: 32, bottom: 16 }))
        );
        assert_eq!(Descriptor::Point3F.parse(&mut String::from("1.0 2.0")), None);
    }

    #[test]
    fn round_trip()
    {
        let cases: Vec<(Descriptor, &str)> = vec![
            (Descriptor::Int32, "-42"),
            (Descriptor::UInt64, "123456789"),
            (Descriptor::Float, "1.25"),
            (Descriptor::Bool, "true"),
            (Descriptor::Text, "free form text"),
            (Descriptor::Path, "models/tree.obj"),
            (Descriptor::Colour, "1 0.5 0 1"),
            (Descriptor::Point3F, "1 2.5 -3"),
            (Descriptor::Size, "1024 768"),
            (Descriptor::Rectangle, "0 0 32 16")
        ];
        for (desc, input) in cases {
            let value = desc.parse(&mut String::from(input)).unwrap();
            assert_eq!(value.to_string(), input);
        }
    }
}

#[cfg(test)]
mod props
{
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn int32_round_trip(v in any::<i32>())
        {
            let value = Descriptor::Int32.parse(&mut v.to_string()).unwrap();
            prop_assert_eq!(value, Value::Int32(v));
        }

        #[test]
        fn uint16_round_trip(v in any::<u16>())
        {
            let value = Descriptor::UInt16.parse(&mut v.to_string()).unwrap();
            prop_assert_eq!(value, Value::UInt16(v));
        }

        #[test]
        fn float_round_trip(v in -1.0e9f32..1.0e9f32)
        {
            let value = Descriptor::Float.parse(&mut v.to_string()).unwrap();
            prop_assert_eq!(value, Value::Float(v));
        }

        #[test]
        fn point3i_round_trip(x in any::<i32>(), y in any::<i32>(), z in any::<i32>())
        {
            let input = format!("{} {} {}", x, y, z);
            let value = Descriptor::Point3I.parse(&mut input.clone()).unwrap();
            prop_assert_eq!(value.to_string(), input);
        }
    }
}
