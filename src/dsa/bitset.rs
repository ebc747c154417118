use std::fmt::Display;
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

#[derive(Error,Debug,Clone,PartialEq,Eq)]
pub enum BitSetError {
    #[error("BitSet index ({index}) out of bounds (size: {size})")]
    IndexOutOfRange{index:usize,size:usize},
    #[error("Invalid binary character {character:?} at position {position}")]
    ParseError{character:char,position:usize},
    // sizes above i128::MAX are reported as i128::MAX
    #[error("BitSet size ({size}) is not a valid non-negative size")]
    InvalidArgument{size:i128}
}

pub type Result<T> = std::result::Result<T,BitSetError>;

const BYTE_ZEROS:u8 = 0;
const BYTE_ONES:u8 = u8::MAX;

// bit i lives in bytes[i/8], least significant bit first
// bytes.len() == ceil(size/8), padding bits past size are kept at zero
#[derive(Clone,Debug,Default,PartialEq,Eq,Hash)]
pub struct BitSet {
    size:usize,
    bytes:Vec<u8>
}

impl BitSet {
    /// Creates a set of `size` bits, all cleared.
    pub fn new(size:usize) -> Self {
        trace!("creating BitSet of size {size}");
        Self {
            size,
            bytes:vec![BYTE_ZEROS;size.div_ceil(8)]
        }
    }
    /// Like [`BitSet::new`], but accepts any integer and rejects negative
    /// or unrepresentable sizes instead of allocating.
    pub fn try_new<S>(size:S) -> Result<Self>
    where S:TryInto<usize> + TryInto<i128> + Copy {
        match TryInto::<usize>::try_into(size) {
            Ok(size) => Ok(Self::new(size)),
            Err(_) => {
                let size = TryInto::<i128>::try_into(size).unwrap_or(i128::MAX);
                debug!("rejected BitSet size {size}");
                Err(BitSetError::InvalidArgument { size })
            }
        }
    }
    /// Builds a set from a string of '0'/'1' characters, character `i` being bit `i`.
    pub fn parse(s:&str) -> Result<Self> {
        let mut set = Self::new(s.chars().count());
        for (position,character) in s.chars().enumerate() {
            match character {
                '0' => {},
                '1' => set.set(position)?,
                _ => {
                    debug!("rejected binary string at position {position}: {character:?}");
                    return Err(BitSetError::ParseError { character, position })
                }
            }
        }
        Ok(set)
    }
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn position_and_mask(&self,index:usize) -> Result<(usize,u8)> {
        if index >= self.size {
            debug!("BitSet index {index} out of bounds (size: {})",self.size);
            return Err(BitSetError::IndexOutOfRange { index, size: self.size })
        }
        Ok((index >> 3,1u8 << (index % 8)))
    }
    pub fn get(&self,index:usize) -> Result<bool> {
        let (byte_pos,mask) = self.position_and_mask(index)?;
        Ok(self.bytes[byte_pos] & mask != 0)
    }
    pub fn set(&mut self,index:usize) -> Result<()> {
        let (byte_pos,mask) = self.position_and_mask(index)?;
        self.bytes[byte_pos] |= mask;
        Ok(())
    }
    pub fn clear(&mut self,index:usize) -> Result<()> {
        let (byte_pos,mask) = self.position_and_mask(index)?;
        self.bytes[byte_pos] &= !mask;
        Ok(())
    }
    pub fn invert(&mut self,index:usize) -> Result<()> {
        let (byte_pos,mask) = self.position_and_mask(index)?;
        self.bytes[byte_pos] ^= mask;
        Ok(())
    }
    /// Sets bit `index` when `bit` is true, clears it otherwise.
    pub fn store(&mut self,index:usize,bit:bool) -> Result<()> {
        if bit {
            self.set(index)
        }else{
            self.clear(index)
        }
    }

    pub fn set_all(&mut self) {
        self.bytes.fill(BYTE_ONES);
        self.clear_padding();
    }
    pub fn clear_all(&mut self) {
        self.bytes.fill(BYTE_ZEROS);
    }
    pub fn invert_all(&mut self) {
        for byte in self.bytes.iter_mut() {
            *byte = !*byte;
        }
        self.clear_padding();
    }

    fn clear_padding(&mut self) {
        let used_in_last = self.size % 8;
        if used_in_last == 0 {return}
        if let Some(last) = self.bytes.last_mut() {
            *last &= (1u8 << used_in_last) - 1;
        }
    }
}

impl Display for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits:String = (0..self.size).map(|index| {
            if self.bytes[index >> 3] & (1u8 << (index % 8)) != 0 {'1'} else {'0'}
        }).collect();
        f.pad(&bits)
    }
}

impl FromStr for BitSet {
    type Err = BitSetError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for BitSet {
    type Error = BitSetError;
    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}
