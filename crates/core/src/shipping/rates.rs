//! Per-unit flat shipping rates by catalog product and variation name, in cents.
//!
//! Generated from the shop's product shipping sheet. Names must match the
//! Square catalog item and variation names exactly.

#[rustfmt::skip]
pub(super) static FLAT_RATES: &[(&str, &[(&str, i64)])] = &[
    ("B&B Tonic Lotion Primer", &[("Standard", 850)]),
    ("B&B Prêt-à-powder Post Workout Dry Shampoo Mist", &[("Standard", 750)]),
    ("B&B Curl Mousse", &[("Standard", 850)]),
    ("B&B Hairdresser's Invisible Oil Long Last Styling Cream", &[("Standard", 750)]),
    ("B&B Seaweed Conditioner", &[("Standard", 850)]),
    ("B&B Sunday Shampoo", &[("Liter", 1450), ("8.5 OZ", 850)]),
    ("B&B Thickening Go Big Plumping Treatment", &[("Standard", 850)]),
    ("B&B Spray de Mode Flexible Hold Hairspray", &[("Standard", 950)]),
    ("B&B Strong Finish Firm Hold Hairspray", &[("Standard", 950)]),
    ("B&B Curl 3-in-1 Conditioner", &[("Standard", 850)]),
    ("B&B Curl Moisturizing Shampoo", &[("Standard", 850)]),
    ("B&B Seaweed Shampoo", &[("Standard", 850)]),
    ("B&B Hairdresser's Invisible Oil Conditioner", &[("Liter", 1450), ("6.7 OZ", 850)]),
    ("B&B All-Style Blow Dry", &[("Standard", 750)]),
    ("B&B Thickening Volume Conditioner", &[("Standard", 850), ("Liter", 1450)]),
    ("B&B Seaweed Air Dry Cream", &[("Standard", 750)]),
    ("B&B Hairdresser's Invisible Oil", &[("Standard", 600)]),
    ("B&B Thickening Great Body Blow Dry Creme", &[("Standard", 750)]),
    ("B&B Hairdresser's Invisible Oil Heat/UV Protective Primer", &[("Travel", 550), ("8.5 OZ", 850), ("11.8 OZ", 950)]),
    ("B&B Thickening Dryspun Texture Spray", &[("Standard", 750), ("Large", 950)]),
    ("B&B Curl Anti-Humidity Gel-Oil", &[("Standard", 750)]),
    ("B&B Grooming Creme", &[("Standard", 750)]),
    ("B&B Curl Light Defining Cream", &[("Standard", 850)]),
    ("B&B Sumoclay", &[("Standard", 550)]),
    ("B&B Prep Primer", &[("Standard", 850)]),
    ("B&B Styling Creme", &[("Standard", 850)]),
    ("B&B Gentle Shampoo", &[("Liter", 1450), ("8.5 OZ", 850)]),
    ("B&B Sumotech", &[("Standard", 550)]),
    ("B&B Prêt-à-powder Tres Invisible Dry Shampoo", &[("3.1 OZ", 650), ("7.5 OZ", 850)]),
    ("B&B Repair Blow Dry", &[("Standard", 750)]),
    ("B&B Don't Blow It Thick (H)air Styler", &[("Standard", 750)]),
    ("B&B Curl Reactivator", &[("Standard", 850)]),
    ("B&B Don't Blow It Fine (H)air Styler", &[("Standard", 750)]),
    ("B&B Hairdresser's Invisible Oil Shampoo", &[("Liter", 1450), ("8.5 OZ", 850)]),
    ("B&B Hairdresser's Invisible Oil Mask", &[("Standard", 900)]),
    ("B&B Surf Spray", &[("Standard", 750)]),
    ("B&B Bond-Building Repair Styling Cream", &[("Standard", 750)]),
    ("B&B Super Rich Conditioner", &[("Liter", 1450), ("8.5 OZ", 850)]),
    ("B&B Brilliantine", &[("Standard", 550)]),
    ("B&B Gel", &[("Standard", 750)]),
    ("B&B Straight Blow Dry", &[("Standard", 750)]),
    ("B&B Does It All Light Hold Hairspray", &[("Standard", 950)]),
    ("B&B Prêt-à-powder Dry Shampoo", &[("Standard", 550)]),
    ("B&B Thickening Spray", &[("Standard", 850)]),
    ("B&B Thickening Volume Shampoo", &[("Standard", 850), ("Liter", 1450)]),
    ("B&B Thickening Full Form Soft Mousse", &[("Standard", 850)]),
    ("B&B Curl Defining Cream", &[("Standard", 850)]),
    ("B&B Heat Shield Thermal Protection Mist", &[("Standard", 750)]),
    ("Olaplex No. 2 Bond Protector", &[("17.75 OZ", 1200)]),
    ("Olaplex LashBond", &[("0.15 OZ", 500)]),
    ("Olaplex No. 9 Bond Protector Nourishing Hair Serum", &[("3 OZ", 600)]),
    ("Olaplex No. 4FINE Bond Maintenance® Shampoo", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex Bond Maintenance Conditioner No.5", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex Stand Alone Treatment Packettes", &[("Single Use", 500)]),
    ("Olaplex Weightless Nourishing Mask", &[("33.8 OZ", 1450), ("8.5 OZ", 900)]),
    ("Olaplex Broad Spectrum Chelating Treatment", &[("12.55 OZ", 1000)]),
    ("Olaplex No.10 Bond Shaper™ Curl Defining Gel", &[("6.8 OZ", 850)]),
    ("Olaplex No. 0.5 Scalp Longevity Treatment", &[("1 OZ", 500)]),
    ("Olaplex Rich Hydration Mask", &[("33.8 OZ", 1450), ("8.5 OZ", 900)]),
    ("Olaplex No. 5FINE Bond Maintenance® Conditioner", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex Volumizing Blow Dry Mist", &[("5 OZ", 750)]),
    ("Olaplex No. 7 Bonding Oil", &[("1 OZ", 500), ("2 OZ", 500)]),
    ("Olaplex No. 4P Blonde Enhancer™ Toning Shampoo", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex No. 5P Blonde Enhancer™ Toning Conditioner", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex Salon Intro Kit - 140 Applications", &[("Kit", 2000)]),
    ("Olaplex No. 1 Bond Multiplier", &[("17.75 OZ", 1200)]),
    ("Olaplex No.4C Bond Maintenance® Clarifying Shampoo", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex No.3 Hair Perfector Take Home", &[("3.3 OZ", 600)]),
    ("Olaplex No.4D Clean Volume Detox Dry Shampoo", &[("1.5 OZ", 550), ("6.3 OZ", 850)]),
    ("Olaplex Pro Scalp Rebalancing Concentrate", &[("10 Pack", 550)]),
    ("Olaplex No.5 Leave-In Moisturize & Mend Leave-In Conditioner", &[("3.3 OZ", 600)]),
    ("Olaplex 4-in-1 Moisture Mask", &[("12.55 OZ", 1000)]),
    ("Olaplex Bond Maintenance Shampoo No.4", &[("33.8 OZ", 1450), ("8.5 OZ", 850)]),
    ("Olaplex Bond Shaper™ Curl Rebuilding Treatment", &[("Professional Kit", 1200)]),
    ("Olaplex No.6 Bond Smoother", &[("3.3 OZ", 600)]),
    ("Olaplex No.0 Intensive Bond Building Hair Treatment", &[("5.2 OZ", 750)]),
    ("Ouai Medium Conditioner", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Leave in Conditioner", &[("4.7 OZ", 750), ("1.5 OZ", 550)]),
    ("Ouai Hair Gloss", &[("6 OZ", 750)]),
    ("Ouai Hand Wash", &[("16 OZ", 1100)]),
    ("Ouai Fine Conditioner", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Anti Dandruff Shampoo", &[("10 OZ", 900)]),
    ("Ouai Melrose Place Super Dry Shampoo", &[("5.6 OZ", 850)]),
    ("Ouai Hair Oil", &[("0.45 OZ", 500), ("1.5 OZ", 500)]),
    ("Ouai St. Barts Travel Kit", &[("Travel", 700)]),
    ("Ouai St. Barts Hair and Body Mist", &[("8 OZ", 850), ("3.3 OZ", 600)]),
    ("Ouai Detox Shampoo", &[("32 OZ", 1450), ("3 OZ", 550)]),
    ("Ouai St. Barts Body Crème", &[("7.5 OZ", 900)]),
    ("Ouai Thick Hair Treatment Masque", &[("8 OZ", 900)]),
    ("Ouai Thickening Spray", &[("4.7 OZ", 750)]),
    ("Ouai St. Barts Body Cleanser", &[("10 OZ", 900)]),
    ("Ouai Deodorant - Melrose Place", &[("2.5 OZ", 550)]),
    ("Ouai Air Dry Foam", &[("4 OZ", 750)]),
    ("Ouai Wave Spray", &[("4.9 OZ", 750)]),
    ("Ouai Fine/Medium Hair Treatment Masque", &[("8 OZ", 900)]),
    ("Ouai Cape Town Super Dry Shampoo", &[("5.6 OZ", 850)]),
    ("Ouai Medium Shampoo", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Thick Shampoo", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Curl Crème", &[("6 OZ", 750)]),
    ("Ouai Fine Shampoo", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Scalp and Body Scrub", &[("8.8 OZ", 900)]),
    ("Ouai Scalp Serum", &[("2 OZ", 500)]),
    ("Ouai Hand Lotion", &[("16 OZ", 1100)]),
    ("Ouai Thick Conditioner", &[("10 OZ", 900), ("32 OZ", 1450)]),
    ("Ouai Anti Frizz Crème", &[("6 OZ", 750)]),
    ("Ouai St. Barts Scalp and Body Scrub", &[("8.8 OZ", 900)]),
    ("Ouai Deodorant - St. Bart's", &[("2.5 OZ", 550)]),
    ("Living Proof Perfect Hair Day (PhD) Heat Styling Spray", &[("5.5 OZ", 750)]),
    ("Living Proof Restore Repair Leave-In", &[("4 OZ", 750)]),
    ("Living Proof Restore Conditioner", &[("8 OZ", 850), ("32 OZ", 1450)]),
    ("Living Proof Restore Shampoo", &[("8 OZ", 850), ("32 OZ", 1450)]),
    ("Living Proof Full Conditioner", &[("32 OZ", 1450), ("2 OZ", 550)]),
    ("Living Proof Style Lab Flex Hairspray", &[("7.5 OZ", 850), ("3 OZ", 600)]),
    ("Living Proof No Frizz Shampoo", &[("8 OZ", 850), ("32 OZ", 1450)]),
    ("Living Proof Style Lab Blowout Spray", &[("5 OZ", 750)]),
    ("Living Proof Perfect Hair Day (PhD) Advanced Clean Dry Shampoo", &[("2.4 OZ", 550), ("9.9 OZ", 950)]),
    ("Living Proof No Frizz Vanishing Oil", &[("1.7 OZ", 500)]),
    ("Living Proof Perfect Hair Day (PhD) 5-in-1 Styling Treatment", &[("4 OZ", 750)]),
    ("Living Proof Leave-In Conditioning Spray", &[("8 OZ", 850)]),
    ("Living Proof Full Volume & Root-Lifting Spray", &[("5.5 OZ", 750)]),
    ("Living Proof No Frizz Smooth Styling Cream", &[("8 OZ", 850)]),
    ("Living Proof Full Dry Volume & Texture Spray", &[("9.9 OZ", 950), ("3 OZ", 600)]),
    ("Living Proof No Frizz Smooth Styling Spray", &[("5.5 OZ", 750)]),
    ("Living Proof Perfect Hair Day (PhD) Shampoo", &[("32 OZ", 1450), ("2 OZ", 550)]),
    ("Living Proof Scalp Care Dry Scalp Treatment", &[("3.4 OZ", 600)]),
    ("Living Proof Perfect Hair Day (PhD) Dry Shampoo", &[("2.4 OZ", 550), ("9.9 OZ", 950)]),
    ("Living Proof Scalp Care Exfoliator", &[("3.4 OZ", 600)]),
    ("Living Proof No Frizz Smooth Styling Serum", &[("1.7 OZ", 500)]),
    ("Living Proof Moisture Rescue Mask", &[("8 OZ", 900)]),
    ("Living Proof Full Shampoo", &[("32 OZ", 1450), ("2 OZ", 550)]),
    ("Living Proof No Frizz Instant De-Frizzer", &[("6.2 OZ", 850)]),
    ("Living Proof Perfect Hair Day (PhD) Conditioner", &[("32 OZ", 1450), ("2 OZ", 550)]),
    ("Living Proof Style Lab amp² Texture Volumizer", &[("2 OZ", 550)]),
    ("Living Proof Full Texturizing Foam", &[("5 OZ", 750)]),
    ("Living Proof Triple Bond Complex", &[("1.5 OZ", 500)]),
    ("Living Proof Perfect Hair Day (PhD) High-Shine Gloss", &[("2.5 OZ", 550)]),
    ("Living Proof No Frizz Conditioner", &[("8 OZ", 850), ("32 OZ", 1450)]),
    ("Living Proof Full Thickening Blow-Dry Cream", &[("3.7 OZ", 600)]),
    ("Living Proof Scalp Care Density Serum", &[("1.7 OZ", 500)]),
    ("Living Proof Clarifying Detox Shampoo", &[("5.4 OZ", 750)]),
    ("CW XTRA Large Bombshell Volumizer", &[("1.7 OZ", 550), ("6.7 OZ", 850)]),
    ("CW Speed Dry Blow-Dry Spray", &[("5 OZ", 750)]),
    ("CW Pop & Lock High Gloss Finish", &[("0.9 OZ", 500), ("1.8 OZ", 550)]),
    ("CW Style on Steroids Texture Spray", &[("6 OZ", 850), ("1.5 OZ", 550)]),
    ("CW Dream Cocktail Coconut-Infused Leave-in Treatment", &[("6.7 OZ", 850)]),
    ("CW Dream Filter Pre-Shampoo Mineral Remover Treatment", &[("1.7 OZ", 550), ("6.7 OZ", 850)]),
    ("CW Color Security Shampoo", &[("32 OZ", 1450), ("2.5 OZ", 550)]),
    ("CW Color Security Conditioner Normal-to-Thick Hair", &[("8.4 OZ", 850), ("32 OZ", 1450)]),
    ("CW Dreaming Advanced Repair + Resurfacing Treatment", &[("7.5 OZ", 900)]),
    ("CW Dream Coat for Curly Hair", &[("16.9 OZ", 1100), ("2.4 OZ", 550)]),
    ("CW Dream Cocktail Kale-Infused Leave-in Treatment", &[("6.7 OZ", 850)]),
    ("CW Root Cover Up", &[("Standard", 500)]),
    ("CW Hooked 100% Clean Curl Shampoo", &[("10 OZ", 900)]),
    ("CW Snag-Free Pre-Shampoo Detangler", &[("10 OZ", 900)]),
    ("CW Raise the Root Thicken + Lift Spray", &[("2.5 OZ", 550), ("5 OZ", 750)]),
    ("CW Money Masque", &[("1.7 OZ", 550), ("7.5 OZ", 900)]),
    ("CW Dream Coat Supernatural Spray", &[("16.9 OZ", 1100), ("1.7 OZ", 550)]),
    ("CW Money Mist Leave-in Conditioner", &[("1.7 OZ", 550), ("5 OZ", 750)]),
    ("CW Extra Strength Dream Coat Anti-Frizz Spray", &[("16.9 OZ", 1100), ("1.7 OZ", 550)]),
    ("CW Coco-Motion Lubricating Conditioner", &[("10 OZ", 900)]),
    ("CW Flo-etry Vital Natural Serum", &[("10 OZ", 900)]),
    ("CW Shook Mix + Fix Bundling Spray", &[("5 OZ", 750)]),
    ("CW Youth Juice Scalp Treatment", &[("1.7 OZ", 500)]),
    ("CW Dream Cocktail Carb-Infused Leave-in Treatment", &[("6.7 OZ", 850)]),
    ("CW One-Minute Transformation Styling Cream", &[("1.7 OZ", 550), ("4 OZ", 750)]),
    ("CW Cult Favorite Firm + Flexible Hairspray", &[("10 OZ", 950), ("2 OZ", 550)]),
    ("CW Extra Mist-ical Shine Spray", &[("5 OZ", 750)]),
    ("CW Insta-WOW Advanced Dry Shampoo", &[("5 OZ", 850)]),
    ("CW Color Security Conditioner Fine-to-Normal Hair", &[("32 OZ", 1450), ("2.5 OZ", 550)]),
    ("CW Texas Hold 'Em Big Hold Hairspray", &[("8.8 OZ", 950)]),
];
