//! Little-endian binary encoding of table rows.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use chrono::NaiveDate;
use transit_types::{
    CountryId, HistoricalAverages, ServiceEstimate, ServiceId, date_of, day_number,
};

/// Magic bytes opening every binary table file.
pub const MAGIC: [u8; 4] = *b"TRT1";

/// A value with a fixed little-endian binary encoding.
pub trait BinaryField: Sized {
    /// Reads one value.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader fails or the bytes are not a valid value.
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;

    /// Writes one value.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()>;
}

impl BinaryField for u8 {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_u8()
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(*self)
    }
}

impl BinaryField for i16 {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i16::<LittleEndian>()
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i16::<LittleEndian>(*self)
    }
}

impl BinaryField for i32 {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i32::<LittleEndian>()
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i32::<LittleEndian>(*self)
    }
}

impl BinaryField for i64 {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        reader.read_i64::<LittleEndian>()
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_i64::<LittleEndian>(*self)
    }
}

impl BinaryField for CountryId {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        i16::read_from(reader).map(Self)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.write_to(writer)
    }
}

impl BinaryField for ServiceId {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        i32::read_from(reader).map(Self)
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.write_to(writer)
    }
}

impl BinaryField for ServiceEstimate {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self::new(i16::read_from(reader)?, i16::read_from(reader)?))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.min_hours.write_to(writer)?;
        self.max_hours.write_to(writer)
    }
}

impl BinaryField for HistoricalAverages {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut values = [0i16; Self::LEN];
        reader.read_i16_into::<LittleEndian>(&mut values)?;
        Ok(Self(values))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.iter().try_for_each(|v| v.write_to(writer))
    }
}

impl BinaryField for NaiveDate {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let day = i64::read_from(reader)?;
        date_of(day).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidData, format!("day {day} out of range"))
        })
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        day_number(*self).write_to(writer)
    }
}

impl BinaryField for String {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let len = reader.read_u16::<LittleEndian>()?;
        let mut bytes = vec![0u8; usize::from(len)];
        reader.read_exact(&mut bytes)?;
        Self::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let len = u16::try_from(self.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "string longer than 65535 bytes")
        })?;
        writer.write_u16::<LittleEndian>(len)?;
        writer.write_all(self.as_bytes())
    }
}

impl<A: BinaryField, B: BinaryField> BinaryField for (A, B) {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok((A::read_from(reader)?, B::read_from(reader)?))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.write_to(writer)?;
        self.1.write_to(writer)
    }
}

impl<A: BinaryField, B: BinaryField, C: BinaryField> BinaryField for (A, B, C) {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok((
            A::read_from(reader)?,
            B::read_from(reader)?,
            C::read_from(reader)?,
        ))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.0.write_to(writer)?;
        self.1.write_to(writer)?;
        self.2.write_to(writer)
    }
}

/// Implements [`BinaryField`] for a struct by encoding its fields in order.
macro_rules! binary_record {
    ($name:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::BinaryField for $name {
            fn read_from<R: ::std::io::Read>(reader: &mut R) -> ::std::io::Result<Self> {
                Ok(Self {
                    $($field: $crate::BinaryField::read_from(reader)?,)+
                })
            }

            fn write_to<W: ::std::io::Write>(&self, writer: &mut W) -> ::std::io::Result<()> {
                $($crate::BinaryField::write_to(&self.$field, writer)?;)+
                Ok(())
            }
        }
    };
}

pub(crate) use binary_record;
