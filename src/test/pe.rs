//! A minimal PE32 image around a metadata blob.
//!
//! Layout: DOS header with `e_lfanew = 0x80`, the NT headers, one `.text` section mapped at
//! RVA 0x2000 from file offset 0x200. The section starts with the CLR header, the metadata
//! root follows directly at RVA 0x2048.

const PE_OFFSET: usize = 0x80;
const SECTION_TABLE: usize = 0x178;
const FILE_ALIGNMENT: usize = 0x200;
const SECTION_ALIGNMENT: usize = 0x2000;
const TEXT_RVA: usize = 0x2000;
const CLR_HEADER_SIZE: usize = 72;

fn align(value: usize, alignment: usize) -> usize {
    value.div_ceil(alignment) * alignment
}

fn put_u16(image: &mut [u8], offset: usize, value: u16) {
    image[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(image: &mut [u8], offset: usize, value: u32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

pub struct PeImageBuilder {
    metadata: Vec<u8>,
}

impl PeImageBuilder {
    pub fn new(metadata: Vec<u8>) -> Self {
        PeImageBuilder { metadata }
    }

    pub fn build(self) -> Vec<u8> {
        let virtual_size = CLR_HEADER_SIZE + self.metadata.len();
        let raw_size = align(virtual_size, FILE_ALIGNMENT);
        let mut image = vec![0_u8; FILE_ALIGNMENT + raw_size];

        // DOS header
        image[0] = b'M';
        image[1] = b'Z';
        put_u32(&mut image, 0x3C, PE_OFFSET as u32);

        // PE signature and COFF header
        image[PE_OFFSET..PE_OFFSET + 4].copy_from_slice(b"PE\0\0");
        let coff = PE_OFFSET + 4;
        put_u16(&mut image, coff, 0x014C);
        put_u16(&mut image, coff + 2, 1);
        put_u16(&mut image, coff + 16, 0xE0);
        put_u16(&mut image, coff + 18, 0x2102);

        // PE32 optional header
        let optional = coff + 20;
        put_u16(&mut image, optional, 0x010B);
        image[optional + 2] = 0x30;
        put_u32(&mut image, optional + 4, raw_size as u32);
        put_u32(&mut image, optional + 20, TEXT_RVA as u32);
        put_u32(&mut image, optional + 28, 0x0040_0000);
        put_u32(&mut image, optional + 32, SECTION_ALIGNMENT as u32);
        put_u32(&mut image, optional + 36, FILE_ALIGNMENT as u32);
        put_u16(&mut image, optional + 40, 4);
        put_u16(&mut image, optional + 48, 4);
        put_u32(
            &mut image,
            optional + 56,
            (TEXT_RVA + align(virtual_size, SECTION_ALIGNMENT)) as u32,
        );
        put_u32(&mut image, optional + 60, FILE_ALIGNMENT as u32);
        put_u16(&mut image, optional + 68, 3);
        put_u16(&mut image, optional + 70, 0x8540);
        put_u32(&mut image, optional + 72, 0x0010_0000);
        put_u32(&mut image, optional + 76, 0x1000);
        put_u32(&mut image, optional + 80, 0x0010_0000);
        put_u32(&mut image, optional + 84, 0x1000);
        put_u32(&mut image, optional + 92, 16);

        // data directory 14, the CLR runtime header
        let clr_directory = optional + 96 + 14 * 8;
        put_u32(&mut image, clr_directory, TEXT_RVA as u32);
        put_u32(&mut image, clr_directory + 4, CLR_HEADER_SIZE as u32);

        // .text
        image[SECTION_TABLE..SECTION_TABLE + 5].copy_from_slice(b".text");
        put_u32(&mut image, SECTION_TABLE + 8, virtual_size as u32);
        put_u32(&mut image, SECTION_TABLE + 12, TEXT_RVA as u32);
        put_u32(&mut image, SECTION_TABLE + 16, raw_size as u32);
        put_u32(&mut image, SECTION_TABLE + 20, FILE_ALIGNMENT as u32);
        put_u32(&mut image, SECTION_TABLE + 36, 0x6000_0020);

        // CLR header
        let cor20 = FILE_ALIGNMENT;
        put_u32(&mut image, cor20, CLR_HEADER_SIZE as u32);
        put_u16(&mut image, cor20 + 4, 2);
        put_u16(&mut image, cor20 + 6, 5);
        put_u32(&mut image, cor20 + 8, (TEXT_RVA + CLR_HEADER_SIZE) as u32);
        put_u32(&mut image, cor20 + 12, self.metadata.len() as u32);
        put_u32(&mut image, cor20 + 16, 1);

        let metadata = cor20 + CLR_HEADER_SIZE;
        image[metadata..metadata + self.metadata.len()].copy_from_slice(&self.metadata);

        image
    }
}
