use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{RngCore, rng};

use super::Block;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

pub const IV_LEN: usize = 16;
pub const BLOCK_LEN: usize = 16;

pub struct Aes128CbcBlock {
    key: [u8; 16],
}

impl Aes128CbcBlock {
    pub fn new(key_material: &[u8; 32]) -> Self {
        let mut key = [0u8; 16];
        key.copy_from_slice(&key_material[..16]);
        Self { key }
    }

    fn generate_iv() -> [u8; IV_LEN] {
        let mut iv = [0u8; IV_LEN];
        rng().fill_bytes(&mut iv);
        iv
    }
}

impl Block for Aes128CbcBlock {
    fn encrypt(&self, data: &mut Vec<u8>) -> crate::Result<()> {
        let iv = Self::generate_iv();
        let ciphertext = Aes128CbcEnc::new((&self.key).into(), (&iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(data);

        data.clear();
        data.extend_from_slice(&iv);
        data.extend_from_slice(&ciphertext);

        Ok(())
    }

    fn decrypt(&self, data: &mut Vec<u8>) -> crate::Result<()> {
        if data.len() < IV_LEN + BLOCK_LEN {
            return Err("data too short for decryption".into());
        }
        if (data.len() - IV_LEN) % BLOCK_LEN != 0 {
            return Err("ciphertext is not a whole number of blocks".into());
        }

        let (iv, ciphertext) = data.split_at(IV_LEN);
        let plaintext = Aes128CbcDec::new_from_slices(&self.key, iv)
            .map_err(|e| format!("decryption failed: {}", e))?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|e| format!("decryption failed: {}", e))?;

        data.clear();
        data.extend_from_slice(&plaintext);

        Ok(())
    }
}
