use ecc::ecdsa::verify;
use ecc::{Curve, EcContext, Ecdsa, EccError};
use sampling::source::Source;

#[test]
fn sign_verify_all_curves() {
    let mut source: Source = Source::new([21u8; 32]);
    for curve in Curve::ALL {
        let ctx: EcContext = EcContext::new(curve).unwrap();
        let key: Ecdsa = Ecdsa::keygen(&ctx, &mut source).unwrap();
        let msg: &[u8] = b"the quick brown fox";
        let sig: Vec<u8> = key.sign(msg, &mut source).unwrap();
        assert_eq!(sig.len(), 2 * ctx.order_bytes(), "{}", curve.name());
        assert_eq!(verify(&ctx, &key.public_key().unwrap(), msg, &sig), Ok(()), "{}", curve.name());
    }
}

#[test]
fn tampering_is_detected() {
    let ctx: EcContext = EcContext::new(Curve::Secp256r1).unwrap();
    let mut source: Source = Source::new([22u8; 32]);
    let key: Ecdsa = Ecdsa::keygen(&ctx, &mut source).unwrap();
    let other: Ecdsa = Ecdsa::keygen(&ctx, &mut source).unwrap();
    let sig: Vec<u8> = key.sign(b"transfer 10", &mut source).unwrap();

    assert_eq!(key.verify(b"transfer 10", &sig), Ok(()));
    assert_eq!(key.verify(b"transfer 11", &sig), Err(EccError::InvalidSignature));
    assert_eq!(other.verify(b"transfer 10", &sig), Err(EccError::InvalidSignature));

    for byte in [0, 31, 32, 63] {
        let mut forged: Vec<u8> = sig.clone();
        forged[byte] ^= 0x01;
        assert_eq!(key.verify(b"transfer 10", &forged), Err(EccError::InvalidSignature));
    }

    let mut high: Vec<u8> = sig.clone();
    high[32..].fill(0xFF);
    assert_eq!(key.verify(b"transfer 10", &high), Err(EccError::InvalidSignature));
}

#[test]
fn fresh_nonce_per_signature() {
    let ctx: EcContext = EcContext::new(Curve::Secp192r1).unwrap();
    let mut source: Source = Source::new([23u8; 32]);
    let key: Ecdsa = Ecdsa::keygen(&ctx, &mut source).unwrap();
    let a: Vec<u8> = key.sign(b"same", &mut source).unwrap();
    let b: Vec<u8> = key.sign(b"same", &mut source).unwrap();
    assert_ne!(a, b);
    assert_eq!(key.verify(b"same", &a), Ok(()));
    assert_eq!(key.verify(b"same", &b), Ok(()));
}
