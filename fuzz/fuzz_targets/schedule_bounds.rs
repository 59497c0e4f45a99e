#![no_main]

use hashchain_pebbler::{advances, max_build_advances, MAX_ORDER};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 { return; }

    let k = u32::from(data[0]) % (MAX_ORDER + 1);
    let round = u64::from_le_bytes(data[1..9].try_into().unwrap_or([0u8; 8]));

    match advances(k, round) {
        Ok(q) => assert!(q <= max_build_advances(k)),
        Err(_) => assert!(k == 0 || round == 0 || round >= (1u64 << k)),
    }
});
