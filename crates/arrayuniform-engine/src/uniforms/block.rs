use crate::error::{EngineError, EngineResult};

pub const UNIFORM_ARRAY_LEN: usize = 4;

/// Two 2D vectors at byte offsets 0 and 8.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformElement {
    pub v0: [f32; 2],
    pub v1: [f32; 2],
}

impl UniformElement {
    pub const SIZE: usize = 16;
    const V0_OFFSET: usize = 0;
    const V1_OFFSET: usize = 8;

    pub const ONE: Self = Self::new([1.0, 1.0], [1.0, 1.0]);

    pub const fn new(v0: [f32; 2], v1: [f32; 2]) -> Self {
        Self { v0, v1 }
    }

    /// Writes the GPU image of this element.
    pub fn pack_into(&self, out: &mut [u8; Self::SIZE]) {
        write_vec2(out, Self::V0_OFFSET, self.v0);
        write_vec2(out, Self::V1_OFFSET, self.v1);
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        self.pack_into(&mut out);
        out
    }
}

impl Default for UniformElement {
    fn default() -> Self {
        Self::ONE
    }
}

fn write_vec2(out: &mut [u8], offset: usize, v: [f32; 2]) {
    out[offset..offset + 4].copy_from_slice(&v[0].to_le_bytes());
    out[offset + 4..offset + 8].copy_from_slice(&v[1].to_le_bytes());
}

/// Fixed-length array of uniform elements, uploaded wholesale each frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UniformBlock {
    elements: [UniformElement; UNIFORM_ARRAY_LEN],
}

impl UniformBlock {
    pub const SIZE: usize = UNIFORM_ARRAY_LEN * UniformElement::SIZE;

    pub fn new(elements: [UniformElement; UNIFORM_ARRAY_LEN]) -> Self {
        Self { elements }
    }

    /// Sample contents: every element is `(1, 1), (1, 1)` except index 2, which
    /// carries distinct values so the binding offset is visible on screen.
    pub fn sample() -> Self {
        let mut block = Self::default();
        block.elements[2] = UniformElement::new([300.0, 400.0], [100.0, 200.0]);
        block
    }

    pub fn elements(&self) -> &[UniformElement; UNIFORM_ARRAY_LEN] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [UniformElement; UNIFORM_ARRAY_LEN] {
        &mut self.elements
    }

    /// GPU image of the whole block.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        for (chunk, element) in out
            .chunks_exact_mut(UniformElement::SIZE)
            .zip(self.elements.iter())
        {
            let mut packed = [0u8; UniformElement::SIZE];
            element.pack_into(&mut packed);
            chunk.copy_from_slice(&packed);
        }
        out
    }

    /// Checks the block against the allocated uniform buffer size.
    pub fn check_buffer_size(buffer_size: u64) -> EngineResult<()> {
        if buffer_size != Self::SIZE as u64 {
            return Err(EngineError::SizeMismatch {
                what: "uniform buffer",
                expected: Self::SIZE as u64,
                actual: buffer_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f32_at(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn element_offsets() {
        let bytes = UniformElement::new([1.5, 2.5], [3.5, 4.5]).to_bytes();
        assert_eq!(f32_at(&bytes, 0), 1.5);
        assert_eq!(f32_at(&bytes, 4), 2.5);
        assert_eq!(f32_at(&bytes, 8), 3.5);
        assert_eq!(f32_at(&bytes, 12), 4.5);
    }

    #[test]
    fn block_is_64_bytes() {
        assert_eq!(UniformBlock::SIZE, 64);
        assert_eq!(UniformBlock::sample().to_bytes().len(), 64);
        assert_eq!(UniformBlock::sample().elements().len(), 4);
    }

    #[test]
    fn sample_marks_third_element() {
        let block = UniformBlock::sample();
        let bytes = block.to_bytes();
        assert_eq!(f32_at(&bytes, 2 * 16), 300.0);
        assert_eq!(f32_at(&bytes, 2 * 16 + 12), 200.0);
        for i in [0, 1, 3] {
            assert_eq!(block.elements()[i], UniformElement::ONE);
        }
    }

    #[test]
    fn repacking_is_stable() {
        let block = UniformBlock::sample();
        assert_eq!(block.to_bytes(), block.to_bytes());
    }

    #[test]
    fn edits_land_at_element_offset() {
        let mut block = UniformBlock::default();
        block.elements_mut()[3].v1 = [7.0, 8.0];
        let bytes = block.to_bytes();
        assert_eq!(f32_at(&bytes, 3 * 16 + 8), 7.0);
        assert_eq!(f32_at(&bytes, 3 * 16 + 12), 8.0);
    }

    #[test]
    fn wrong_buffer_size_is_rejected() {
        assert!(UniformBlock::check_buffer_size(64).is_ok());
        assert!(matches!(
            UniformBlock::check_buffer_size(48),
            Err(EngineError::SizeMismatch { expected: 64, actual: 48, .. })
        ));
    }
}
