/// XORs `payload` in place with `mask_key`, byte `i` against `mask_key[i % 4]`.
///
/// Applying the same key twice restores the input, so this both masks and unmasks.
pub fn apply_mask(payload: &mut [u8], mask_key: [u8; 4]) {
    #[cfg(all(target_arch = "x86_64", feature = "simd_masking"))]
    if is_x86_feature_detected!("avx2") {
        // SAFETY: avx2 support checked above
        unsafe { mask_avx2(payload, mask_key) };
        return;
    }

    mask_words(payload, mask_key);
}

#[cfg(all(target_arch = "x86_64", feature = "simd_masking"))]
#[target_feature(enable = "avx2")]
#[allow(clippy::cast_possible_wrap, clippy::cast_ptr_alignment, clippy::ptr_as_ptr)]
unsafe fn mask_avx2(payload: &mut [u8], mask_key: [u8; 4]) {
    use std::arch::x86_64::{
        __m256i, _mm256_loadu_si256, _mm256_set1_epi32, _mm256_storeu_si256, _mm256_xor_si256,
    };

    let mask256 = _mm256_set1_epi32(i32::from_le_bytes(mask_key));

    let mut chunks = payload.chunks_exact_mut(32);
    for chunk in &mut chunks {
        let ptr = chunk.as_mut_ptr() as *mut __m256i;
        // SAFETY: chunk is exactly 32 bytes and loadu/storeu have no alignment requirement
        unsafe {
            let data = _mm256_loadu_si256(ptr);
            _mm256_storeu_si256(ptr, _mm256_xor_si256(data, mask256));
        }
    }

    // 32 is a multiple of 4 so the tail starts back at mask_key[0]
    mask_words(chunks.into_remainder(), mask_key);
}

fn mask_words(payload: &mut [u8], mask_key: [u8; 4]) {
    let key = u32::from_ne_bytes(mask_key);

    let mut chunks = payload.chunks_exact_mut(4);
    for chunk in &mut chunks {
        let mut word = [0; 4];
        word.copy_from_slice(chunk);
        chunk.copy_from_slice(&(u32::from_ne_bytes(word) ^ key).to_ne_bytes());
    }

    mask_bytes(chunks.into_remainder(), mask_key);
}

fn mask_bytes(payload: &mut [u8], mask_key: [u8; 4]) {
    for (i, b) in payload.iter_mut().enumerate() {
        *b ^= mask_key[i % 4];
    }
}
