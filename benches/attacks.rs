use cryptopals::{
    byte_at_a_time_ecb_decrypt, cbc_padding_oracle_attack, mt19937_cipher,
    recover_seed_from_mt19937_cipher_encrypted_message, CbcPaddingOracle, EcbRandomPrefixOracle,
    EcbSuffixOracle, Mt19937,
};

use criterion::{criterion_group, criterion_main, Criterion};

const SECRET: &[u8] = b"Rollin' in my 5.0\n\
With my rag-top down so my hair can blow\n\
The girlies on standby waving just to say hi\n\
Did you stop? No, I just drove by\n";

const KEY: [u8; 16] = *b"YELLOW SUBMARINE";

pub fn bench_byte_at_a_time_ecb_decrypt(c: &mut Criterion) {
    let oracle = EcbSuffixOracle::new(KEY, SECRET.to_vec());
    c.bench_function("byte_at_a_time_ecb_decrypt", |b| {
        b.iter(|| byte_at_a_time_ecb_decrypt(&oracle).unwrap())
    });
}

pub fn bench_byte_at_a_time_ecb_decrypt_with_prefix(c: &mut Criterion) {
    let oracle = EcbRandomPrefixOracle::new(KEY, 101, SECRET.to_vec());
    c.bench_function("byte_at_a_time_ecb_decrypt_with_prefix", |b| {
        b.iter(|| byte_at_a_time_ecb_decrypt(&oracle).unwrap())
    });
}

pub fn bench_cbc_padding_oracle_attack(c: &mut Criterion) {
    let mut oracle = CbcPaddingOracle::new(KEY, 101);
    let (iv, ciphertext) = oracle.encrypt_plaintext(1).unwrap();
    c.bench_function("cbc_padding_oracle_attack", |b| {
        b.iter(|| cbc_padding_oracle_attack(&ciphertext, &iv, &oracle).unwrap())
    });
}

pub fn bench_mt19937_generate(c: &mut Criterion) {
    let mut rng = Mt19937::new(5489);
    c.bench_function("mt19937_generate", |b| b.iter(|| rng.generate()));
}

pub fn bench_recover_mt19937_cipher_seed(c: &mut Criterion) {
    let message = [b"x".repeat(20), b"A".repeat(14)].concat();
    let ciphertext = mt19937_cipher(40_000, &message);
    c.bench_function("recover_mt19937_cipher_seed", |b| {
        b.iter(|| {
            recover_seed_from_mt19937_cipher_encrypted_message(&ciphertext, &b"A".repeat(14))
                .unwrap()
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets =
        bench_byte_at_a_time_ecb_decrypt,
        bench_byte_at_a_time_ecb_decrypt_with_prefix,
        bench_cbc_padding_oracle_attack,
        bench_mt19937_generate,
        bench_recover_mt19937_cipher_seed,
}
criterion_main!(benches);
