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
use std::path::{Path, PathBuf};

use crate::types::{Colour, Point2f, Point2i, Point3f, Point3i, Point4f, Point4i, Position, Rectangle, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum Value
{
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
    Text(String),
    Name(String),
    Path(PathBuf),
    CheckedText(u32),
    Bitfield32(u32),
    Bitfield64(u64),
    Colour(Colour),
    Point2I(Point2i),
    Point3I(Point3i),
    Point4I(Point4i),
    Point2F(Point2f),
    Point3F(Point3f),
    Point4F(Point4f),
    Size(Size),
    Position(Position),
    Rectangle(Rectangle)
}

impl Value
{
    pub fn bool(&self) -> Option<bool>
    {
        if let Value::Bool(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn int8(&self) -> Option<i8>
    {
        if let Value::Int8(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn int16(&self) -> Option<i16>
    {
        if let Value::Int16(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn int32(&self) -> Option<i32>
    {
        if let Value::Int32(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn int64(&self) -> Option<i64>
    {
        if let Value::Int64(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn uint8(&self) -> Option<u8>
    {
        if let Value::UInt8(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn uint16(&self) -> Option<u16>
    {
        if let Value::UInt16(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn uint32(&self) -> Option<u32>
    {
        if let Value::UInt32(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn uint64(&self) -> Option<u64>
    {
        if let Value::UInt64(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn float(&self) -> Option<f32>
    {
        if let Value::Float(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn double(&self) -> Option<f64>
    {
        if let Value::Double(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn text(&self) -> Option<&str>
    {
        if let Value::Text(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<&str>
    {
        if let Value::Name(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn path(&self) -> Option<&Path>
    {
        if let Value::Path(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Value of a checked text parameter, resolved through its lookup table.
    pub fn checked(&self) -> Option<u32>
    {
        if let Value::CheckedText(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn bitfield32(&self) -> Option<u32>
    {
        if let Value::Bitfield32(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn bitfield64(&self) -> Option<u64>
    {
        if let Value::Bitfield64(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn colour(&self) -> Option<Colour>
    {
        if let Value::Colour(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point2i(&self) -> Option<Point2i>
    {
        if let Value::Point2I(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point3i(&self) -> Option<Point3i>
    {
        if let Value::Point3I(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point4i(&self) -> Option<Point4i>
    {
        if let Value::Point4I(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point2f(&self) -> Option<Point2f>
    {
        if let Value::Point2F(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point3f(&self) -> Option<Point3f>
    {
        if let Value::Point3F(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn point4f(&self) -> Option<Point4f>
    {
        if let Value::Point4F(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn size(&self) -> Option<Size>
    {
        if let Value::Size(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn position(&self) -> Option<Position>
    {
        if let Value::Position(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    pub fn rectangle(&self) -> Option<Rectangle>
    {
        if let Value::Rectangle(v) = self {
            Some(*v)
        } else {
            None
        }
    }
}

impl Display for Value
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
    {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
            Value::Name(v) => f.write_str(v),
            Value::Path(v) => write!(f, "{}", v.display()),
            Value::CheckedText(v) => write!(f, "{}", v),
            Value::Bitfield32(v) => write!(f, "{}", v),
            Value::Bitfield64(v) => write!(f, "{}", v),
            Value::Colour(v) => write!(f, "{}", v),
            Value::Point2I(v) => write!(f, "{}", v),
            Value::Point3I(v) => write!(f, "{}", v),
            Value::Point4I(v) => write!(f, "{}", v),
            Value::Point2F(v) => write!(f, "{}", v),
            Value::Point3F(v) => write!(f, "{}", v),
            Value::Point4F(v) => write!(f, "{}", v),
            Value::Size(v) => write!(f, "{}", v),
            Value::Position(v) => write!(f, "{}", v),
            Value::Rectangle(v) => write!(f, "{}", v)
        }
    }
}
