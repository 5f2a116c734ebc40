/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A small cursor over an in-memory byte buffer
//!
//! Every read is bounds checked, a failed read does not move the
//! position.
use core::fmt::{Debug, Display, Formatter};

pub enum ByteIoError {
    /// requested, available
    NotEnoughBytes(usize, usize),
    /// A seek to a position past the end of the buffer
    SeekError(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::SeekError(position, len) => {
                writeln!(f, "Cannot seek to {position}, buffer length is {len}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(self, f)
    }
}

pub struct ByteReader<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteReader<'a> {
    pub const fn new(stream: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream,
            position: 0
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    #[inline]
    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        self.set_position(self.position.saturating_add(num))
    }

    /// Move to an absolute position, which may be the end of
    /// the buffer but not past it.
    #[inline]
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        if position > self.stream.len() {
            return Err(ByteIoError::SeekError(position, self.stream.len()));
        }
        self.position = position;
        Ok(())
    }

    #[inline]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        let [byte] = self.read_fixed_bytes_or_error::<1>()?;
        Ok(byte)
    }

    #[inline]
    pub fn read_fixed_bytes_or_error<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let end = self.position.saturating_add(N);

        match self.stream.get(self.position..end) {
            Some(bytes) => {
                let mut store = [0; N];
                store.copy_from_slice(bytes);
                self.position = end;
                Ok(store)
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining()))
        }
    }

    /// Return a view of `num_bytes` starting at `position` without
    /// moving the cursor.
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let end = position.saturating_add(num_bytes);

        self.stream
            .get(position..end)
            .ok_or(ByteIoError::NotEnoughBytes(
                end,
                self.stream.len()
            ))
    }

    #[inline]
    pub fn get_u16_le_err(&mut self) -> Result<u16, ByteIoError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes_or_error()?))
    }

    #[inline]
    pub fn get_u32_le_err(&mut self) -> Result<u32, ByteIoError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes_or_error()?))
    }

    #[inline]
    pub fn get_i32_le_err(&mut self) -> Result<i32, ByteIoError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes_or_error()?))
    }
}
