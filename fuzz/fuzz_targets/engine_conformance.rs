#![no_main]

use hashchain_pebbler::{Block, ChainDriver, IterativeEngine, KeyedBlake3Owf, PebbleEngine, Pebbler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 65 { return; }

    let k = u32::from(data[0] % 9);
    let key: [u8; 32] = data[1..33].try_into().unwrap_or([0u8; 32]);
    let seed = Block(data[33..65].try_into().unwrap_or([0u8; 32]));

    let f = KeyedBlake3Owf::new(&key);
    let mut rec = PebbleEngine::new(k, seed, &f).unwrap();
    let mut flat = IterativeEngine::new(k, seed, &f).unwrap();
    let mut driver = ChainDriver::new(&f);

    while !rec.is_exhausted() {
        let a = rec.step().unwrap();
        let b = flat.step().unwrap();
        assert_eq!(a, b);
        assert!(rec.live_blocks() <= k as usize + 1);
        if let Some(v) = a.into_value() {
            driver.accept(v).unwrap();
        }
    }
    assert!(flat.is_exhausted());
    assert_eq!(driver.commitment(), Some(&seed));
});
