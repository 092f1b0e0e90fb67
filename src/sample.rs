//! Small measurement sample used by tests and benches

pub const SAMPLE_100: &str = "\
Reykjavík;37.0
Gaborone;-15.6
Tromsø;10.4
Muscat;-17.3
Asmara;8.3
Baghdad;27.1
Santiago;18.7
Tegucigalpa;39.5
London;29.8
Malé;-9.0
Halifax;11.2
Windhoek;-25.8
Kathmandu;-21.8
Mendoza;11.6
Valletta;-14.4
Mbabane;-0.1
Nouméa;-9.8
Yangon;-12.9
Managua;-25.8
Ouagadougou;-23.7
Anchorage;27.5
Juneau;-10.1
Whitehorse;-29.7
Palembang;15.6
Managua;-13.7
Suva;21.1
La Paz;10.1
Hobart;-19.4
Nassau;36.1
Halifax;36.3
Quito;-19.4
Thimphu;25.6
Papeete;-0.7
Maseru;17.6
Asunción;31.3
Bulawayo;-19.4
Luanda;-25.6
Reykjavík;-25.1
Vientiane;10.2
Mendoza;31.9
Hobart;-26.7
Belmopan;16.5
Paramaribo;16.8
Bridgetown;-4.4
Havana;28.8
Ushuaia;10.6
Gaborone;3.9
Sana'a;10.7
Mogadishu;-3.9
Longyearbyen;-21.8
Yellowknife;16.8
Djibouti;14.7
Ulaanbaatar;-9.7
Antananarivo;-8.0
Darwin;30.1
Paramaribo;-17.7
Apia;-13.8
Zürich;0.4
Whitehorse;-3.0
Port Louis;11.0
Bogotá;-11.6
Bogotá;4.2
Cracow;7.5
St. John's;-24.9
Hanoi;6.8
Москва;-0.3
São Paulo;-2.2
Hamburg;-7.3
Tórshavn;-18.2
Mogadishu;-10.5
Dhaka;18.9
Kraków;-21.3
Wellington;38.3
Caracas;-27.3
Tbilisi;-8.4
Conakry;-27.4
Lhasa;-19.9
Roseau;5.5
Murmansk;-25.9
Montevideo;-8.0
東京都;27.9
Vorkuta;-4.9
Apia;-21.7
Norilsk;-20.9
Honiara;38.6
San José;19.1
Cayenne;23.5
Istanbul;-25.9
London;1.3
Vorkuta;23.8
Nuuk;2.3
Punta Arenas;1.9
Honiara;-0.9
Odesa;13.9
Victoria;1.7
Panama City;15.3
Iqaluit;-28.4
Manila;31.3
Kingston;3.2
Lima;23.0
";
