//! Dot translation between standard and device-native cell encodings
//!
//! The host numbers dots 1..8 as bits 0..7. The display wires dots 2..5 in
//! a different order; dots 1, 6, 7 and 8 are unchanged:
//!
//! | dot | host bit | device bit |
//! |-----|----------|------------|
//! | 1   | 0        | 0          |
//! | 2   | 1        | 3          |
//! | 3   | 2        | 1          |
//! | 4   | 3        | 4          |
//! | 5   | 4        | 2          |
//! | 6   | 5        | 5          |
//! | 7   | 6        | 6          |
//! | 8   | 7        | 7          |

/// Device bit position for each host bit position
const DEVICE_BIT: [u8; 8] = [0, 3, 1, 4, 2, 5, 6, 7];

/// Host-to-device translation for every possible cell value
pub static TO_DEVICE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut value = 0;
    while value < 256 {
        let mut native = 0u8;
        let mut bit = 0;
        while bit < 8 {
            if value & (1 << bit) != 0 {
                native |= 1 << DEVICE_BIT[bit];
            }
            bit += 1;
        }
        table[value] = native;
        value += 1;
    }
    table
}

/// Translate one cell from host to device dot order
#[inline]
pub fn to_device(cell: u8) -> u8 {
    TO_DEVICE[cell as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_entries() {
        assert_eq!(to_device(0x00), 0x00);
        assert_eq!(to_device(0x02), 0x08);
        assert_eq!(to_device(0x04), 0x02);
        assert_eq!(to_device(0x06), 0x0A);
        assert_eq!(to_device(0x10), 0x04);
        assert_eq!(to_device(0x18), 0x14);
        assert_eq!(to_device(0x3C), 0x36);
        assert_eq!(to_device(0xFF), 0xFF);
    }

    #[test]
    fn test_table_is_permutation() {
        let mut seen = [false; 256];
        for &native in TO_DEVICE.iter() {
            assert!(!seen[native as usize], "duplicate {:#04x}", native);
            seen[native as usize] = true;
        }
    }

    proptest! {
        #[test]
        fn test_dot_count_preserved(cell in any::<u8>()) {
            prop_assert_eq!(to_device(cell).count_ones(), cell.count_ones());
        }

        #[test]
        fn test_translation_is_per_dot(a in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(to_device(a | b), to_device(a) | to_device(b));
        }
    }
}
